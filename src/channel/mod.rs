//! Front ends that drive a [`Conversation`](crate::conversation::Conversation).

pub mod pty;
