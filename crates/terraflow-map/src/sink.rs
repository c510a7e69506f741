//! Status reporting toward whatever front end drives a [`Session`](crate::Session).

/// Receives short, human-readable status lines.
pub trait StatusSink {
    fn status(&mut self, message: &str);
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn status(&mut self, _message: &str) {}
}

/// Collects messages, newest last.
impl StatusSink for Vec<String> {
    fn status(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}

impl<S: StatusSink + ?Sized> StatusSink for &mut S {
    fn status(&mut self, message: &str) {
        (**self).status(message);
    }
}
