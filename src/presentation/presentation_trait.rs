use std::io;

use crate::session::session_state::SessionSnapshot;

/// Consumer of session snapshots. Presentations only read state; input comes
/// back to the scheduler as `SessionEvent`s.
pub trait Presentation<R> {
    fn render(&mut self, snapshot: &SessionSnapshot<'_, R>) -> io::Result<()>;
}
