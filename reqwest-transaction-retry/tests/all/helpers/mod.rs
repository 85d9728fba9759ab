mod scripted;
mod simple_server;

pub use scripted::{request, ScriptedExecutor, Seen};
pub use simple_server::SimpleServer;
pub use strategies::{FixedRandom, RecordingTimer};
