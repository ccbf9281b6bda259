use crate::config::{Session, Step};
use crate::error::Error;
use crate::ring_buffer::RingBuffer;
use log::{debug, info};

/// What a successful step did to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Pushed(usize),
    Pulled(Vec<u8>),
    Cleared,
    Resized(usize),
}

/// Progress reported to the observer while a session runs.
pub enum Progress<'a> {
    Started(&'a RingBuffer),
    Step {
        index: usize,
        step: &'a Step,
        outcome: &'a StepOutcome,
        buffer: &'a RingBuffer,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("cannot create buffer: {0}")]
    Setup(#[source] Error),
    #[error("step {index} ({step}) failed: {source}")]
    Step {
        index: usize,
        step: Step,
        #[source]
        source: Error,
    },
}

impl ScriptError {
    /// The buffer error behind this failure.
    pub fn buffer_error(&self) -> Error {
        match self {
            ScriptError::Setup(e) => *e,
            ScriptError::Step { source, .. } => *source,
        }
    }
}

pub fn apply(buf: &mut RingBuffer, step: &Step) -> Result<StepOutcome, Error> {
    match step {
        Step::Push(data) => {
            buf.push(data)?;
            Ok(StepOutcome::Pushed(data.len()))
        }
        Step::Pull(n) => buf.pull(*n).map(StepOutcome::Pulled),
        Step::Clear => {
            buf.clear();
            Ok(StepOutcome::Cleared)
        }
        Step::Resize(capacity) => {
            buf.resize(*capacity)?;
            Ok(StepOutcome::Resized(*capacity))
        }
    }
}

/// Runs every step of `session` against a fresh buffer, stopping at the first failure.
pub fn run<F>(session: &Session, mut observer: F) -> Result<RingBuffer, ScriptError>
where
    F: FnMut(Progress<'_>),
{
    let mut buf = RingBuffer::new(session.capacity).map_err(ScriptError::Setup)?;
    info!("Running {} steps on a {}-byte buffer", session.steps.len(), session.capacity);
    observer(Progress::Started(&buf));

    for (index, step) in session.steps.iter().enumerate() {
        let outcome = apply(&mut buf, step).map_err(|source| ScriptError::Step {
            index,
            step: step.clone(),
            source,
        })?;
        debug!(
            "step {}: {} -> occupied {}, available {}",
            index,
            step,
            buf.occupied_size(),
            buf.available_size()
        );
        observer(Progress::Step {
            index,
            step,
            outcome: &outcome,
            buffer: &buf,
        });
    }

    Ok(buf)
}
