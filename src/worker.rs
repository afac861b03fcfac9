use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Instant;

use log::{debug, info};
use tokio::time::{interval, MissedTickBehavior};

use crate::clock::FixedTimestep;
use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::signal::SimulationParameters;
use crate::simulation::{Command, RenderedFrame, Simulation};
use crate::status::FpsCounter;

// Messages back to the GUI
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Frame(Box<RenderedFrame>),
    Parameters(SimulationParameters),
    Fps(u32),
}

// Why the loop stopped
enum Exit {
    CommandsClosed,
    ResponsesClosed,
}

// Runs the animation loop until the GUI drops its end of either channel.
// All simulation state is owned here; the GUI only sends commands.
pub fn worker_thread(
    config: SimulationConfig,
    commands: Receiver<Command>,
    responses: Sender<Response>,
) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(Error::Runtime)?;

    rt.block_on(async move {
        let mut simulation = Simulation::new(config);
        let mut stepper = FixedTimestep::new(
            simulation.config().clock.tick_interval(),
            simulation.config().clock.max_catch_up_ticks,
        );
        let mut pacer = interval(stepper.interval());
        pacer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "animation loop started at {} Hz",
            simulation.config().clock.tick_rate_hz
        );

        // Let the GUI fill its fields with the starting values
        if responses
            .send(Response::Parameters(simulation.params()))
            .is_err()
        {
            return Ok(());
        }

        let mut last = Instant::now();
        let mut fps = FpsCounter::new(last);

        let exit = loop {
            pacer.tick().await;

            // Commands are applied between ticks, never in the middle of one
            if let Err(exit) = drain_commands(&mut simulation, &commands, &responses) {
                break exit;
            }

            let now = Instant::now();
            let ticks = stepper.advance(now - last);
            last = now;

            let mut closed = false;
            for _ in 0..ticks {
                simulation.tick();
                let frame = simulation.render_frame();
                if responses.send(Response::Frame(Box::new(frame))).is_err() {
                    closed = true;
                    break;
                }
                fps.record_tick();
            }
            if closed {
                break Exit::ResponsesClosed;
            }

            if let Some(count) = fps.poll(now) {
                if responses.send(Response::Fps(count)).is_err() {
                    break Exit::ResponsesClosed;
                }
            }
        };

        match exit {
            Exit::CommandsClosed => info!("command channel closed, animation loop stopped"),
            Exit::ResponsesClosed => info!("gui went away, animation loop stopped"),
        }
        Ok(())
    })
}

fn drain_commands(
    simulation: &mut Simulation,
    commands: &Receiver<Command>,
    responses: &Sender<Response>,
) -> std::result::Result<(), Exit> {
    loop {
        match commands.try_recv() {
            Ok(command) => {
                if let Some(params) = simulation.apply(command) {
                    responses
                        .send(Response::Parameters(params))
                        .map_err(|_| Exit::ResponsesClosed)?;
                }
            }
            Err(TryRecvError::Empty) => return Ok(()),
            Err(TryRecvError::Disconnected) => {
                debug!("no more commands");
                return Err(Exit::CommandsClosed);
            }
        }
    }
}
