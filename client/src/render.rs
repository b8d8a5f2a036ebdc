use alloy_primitives::Address;
use skilldao_common::activity::ActivityEntry;
use skilldao_common::certification::Certification;
use skilldao_common::notification::Notification;
use skilldao_common::stats::PlatformStats;

/// Forms whose inputs are cleared after a confirmed transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Form {
    /// Skill name, level and description.
    Certify,
    /// Certification id and message.
    Endorse,
}

/// Named display slots the controller pushes into.
///
/// The controller never reads layout state back; everything it needs lives
/// in its own fields.
pub trait RenderSurface {
    /// Connected identity, or `None` when disconnected.
    fn show_connection(&mut self, identity: Option<Address>);

    /// Formatted balance of the connected identity.
    fn show_balance(&mut self, balance: Option<String>);

    fn show_stats(&mut self, stats: &PlatformStats);

    fn show_certification(&mut self, certification: &Certification);

    /// Whole feed, most recent first.
    fn show_activity(&mut self, entries: &[ActivityEntry]);

    fn show_notification(&mut self, notification: &Notification);

    fn set_loading(&mut self, loading: bool);

    fn clear_form(&mut self, form: Form);
}

/// Shows the loading indicator for as long as it is alive.
///
/// Dropping the guard clears the indicator on every exit path, including an
/// early return, an error, or the handler's future being dropped mid-await.
pub struct LoadingGuard<'a, R: RenderSurface> {
    surface: &'a mut R,
}

impl<'a, R: RenderSurface> LoadingGuard<'a, R> {
    pub fn new(surface: &'a mut R) -> Self {
        surface.set_loading(true);
        Self { surface }
    }
}

impl<R: RenderSurface> Drop for LoadingGuard<'_, R> {
    fn drop(&mut self) {
        self.surface.set_loading(false);
    }
}
