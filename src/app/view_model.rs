/// Lifecycle hooks a view calls when it binds to or releases a view model.
///
/// Anything a view model schedules for later (timers, background tasks) is
/// owned by it and must stop once `on_deactivate` returns.
pub trait ViewModel {
    fn on_activate(&mut self) {}

    fn on_deactivate(&mut self) {}
}
