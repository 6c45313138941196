//! Domain model (task names, command lines, arguments, outcomes, events).

pub mod args;
pub mod command;
pub mod errors;
pub mod events;
pub mod ids;
pub mod outcome;
pub mod task_name;

pub use self::args::{Invocation, TaskArgs};
pub use self::command::{CommandLine, Plan};
pub use self::errors::{ErrorKind, PublishError};
pub use self::events::DomainEvent;
pub use self::ids::RunId;
pub use self::outcome::{Artifact, CommandOutput, StepOutcome, StepStatus, TaskReport};
pub use self::task_name::TaskName;
