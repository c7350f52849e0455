//! Time-boxed hint overlay. The controller owns the expiry timer handle `T`
//! (a browser timeout in the app); dropping the handle cancels the timer.

#[derive(Debug)]
pub struct HintController<T> {
    active: bool,
    timer: Option<T>,
}

impl<T> Default for HintController<T> {
    fn default() -> Self {
        Self { active: false, timer: None }
    }
}

impl<T> HintController<T> {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activates the overlay and arms the expiry timer through `schedule`,
    /// which receives the delay in milliseconds. No-op while already active.
    pub fn show(&mut self, duration_ms: u32, schedule: impl FnOnce(u32) -> T) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.timer = Some(schedule(duration_ms));
        true
    }

    /// Timer callback. Returns the spent handle so the caller decides when
    /// to drop it.
    pub fn expire(&mut self) -> Option<T> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.timer.take()
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.timer = None;
    }
}
