/// Phases of the single main window, from creation to process exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowPhase {
    Created,
    Loading,
    Visible,
    Hidden,
    Closing,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleEvent {
    LoadStarted,
    ContentReady { start_hidden: bool },
    Show,
    Hide,
    CloseRequested { quit_on_close: bool },
    QuitRequested,
    Exited,
}

/// What the runtime must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleEffect {
    None,
    ShowWindow,
    HideWindow,
    /// Prevent the native close and start a full quit instead.
    Quit,
    /// Prevent the native close and keep the window alive, out of view.
    PreventCloseAndHide,
    AllowClose,
    /// First entry into `Closing`: flush the window geometry.
    PersistGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WindowLifecycle {
    phase: WindowPhase,
}

impl Default for WindowLifecycle {
    fn default() -> Self {
        Self {
            phase: WindowPhase::Created,
        }
    }
}

impl WindowLifecycle {
    pub(crate) fn phase(&self) -> WindowPhase {
        self.phase
    }

    pub(crate) fn is_quitting(&self) -> bool {
        matches!(self.phase, WindowPhase::Closing | WindowPhase::Terminated)
    }

    pub(crate) fn apply(&mut self, event: LifecycleEvent) -> LifecycleEffect {
        use LifecycleEffect as Effect;
        use WindowPhase as Phase;

        if self.is_quitting() {
            return match event {
                LifecycleEvent::CloseRequested { .. } => Effect::AllowClose,
                LifecycleEvent::Exited => {
                    self.phase = Phase::Terminated;
                    Effect::None
                }
                _ => Effect::None,
            };
        }

        match event {
            LifecycleEvent::LoadStarted => {
                if self.phase == Phase::Created {
                    self.phase = Phase::Loading;
                }
                Effect::None
            }
            LifecycleEvent::ContentReady { start_hidden } => {
                if self.phase != Phase::Loading {
                    return Effect::None;
                }
                if start_hidden {
                    self.phase = Phase::Hidden;
                    Effect::HideWindow
                } else {
                    self.phase = Phase::Visible;
                    Effect::ShowWindow
                }
            }
            LifecycleEvent::Show => {
                self.phase = Phase::Visible;
                Effect::ShowWindow
            }
            LifecycleEvent::Hide => {
                self.phase = Phase::Hidden;
                Effect::HideWindow
            }
            LifecycleEvent::CloseRequested { quit_on_close } => {
                if quit_on_close {
                    Effect::Quit
                } else {
                    self.phase = Phase::Hidden;
                    Effect::PreventCloseAndHide
                }
            }
            LifecycleEvent::QuitRequested => {
                self.phase = Phase::Closing;
                Effect::PersistGeometry
            }
            LifecycleEvent::Exited => {
                self.phase = Phase::Terminated;
                Effect::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loading() -> WindowLifecycle {
        let mut lifecycle = WindowLifecycle::default();
        lifecycle.apply(LifecycleEvent::LoadStarted);
        lifecycle
    }

    #[test]
    fn first_content_ready_shows_window() {
        let mut lifecycle = loading();
        assert_eq!(lifecycle.phase(), WindowPhase::Loading);
        assert_eq!(
            lifecycle.apply(LifecycleEvent::ContentReady {
                start_hidden: false
            }),
            LifecycleEffect::ShowWindow
        );
        assert_eq!(lifecycle.phase(), WindowPhase::Visible);
    }

    #[test]
    fn content_ready_keeps_window_hidden_when_launched_minimized() {
        let mut lifecycle = loading();
        assert_eq!(
            lifecycle.apply(LifecycleEvent::ContentReady { start_hidden: true }),
            LifecycleEffect::HideWindow
        );
        assert_eq!(lifecycle.phase(), WindowPhase::Hidden);
    }

    #[test]
    fn later_page_loads_do_not_change_visibility() {
        let mut lifecycle = loading();
        lifecycle.apply(LifecycleEvent::ContentReady {
            start_hidden: false,
        });
        lifecycle.apply(LifecycleEvent::Hide);

        assert_eq!(
            lifecycle.apply(LifecycleEvent::ContentReady {
                start_hidden: false
            }),
            LifecycleEffect::None
        );
        assert_eq!(lifecycle.phase(), WindowPhase::Hidden);
    }

    #[test]
    fn show_and_hide_toggle_visibility() {
        let mut lifecycle = loading();
        assert_eq!(
            lifecycle.apply(LifecycleEvent::Show),
            LifecycleEffect::ShowWindow
        );
        assert_eq!(lifecycle.phase(), WindowPhase::Visible);
        assert_eq!(
            lifecycle.apply(LifecycleEvent::Hide),
            LifecycleEffect::HideWindow
        );
        assert_eq!(lifecycle.phase(), WindowPhase::Hidden);
    }

    #[test]
    fn close_without_quit_on_close_hides_window() {
        let mut lifecycle = loading();
        lifecycle.apply(LifecycleEvent::Show);
        assert_eq!(
            lifecycle.apply(LifecycleEvent::CloseRequested {
                quit_on_close: false
            }),
            LifecycleEffect::PreventCloseAndHide
        );
        assert_eq!(lifecycle.phase(), WindowPhase::Hidden);
        assert!(!lifecycle.is_quitting());
    }

    #[test]
    fn close_with_quit_on_close_requests_quit() {
        let mut lifecycle = loading();
        lifecycle.apply(LifecycleEvent::Show);
        assert_eq!(
            lifecycle.apply(LifecycleEvent::CloseRequested {
                quit_on_close: true
            }),
            LifecycleEffect::Quit
        );
        assert_eq!(
            lifecycle.apply(LifecycleEvent::QuitRequested),
            LifecycleEffect::PersistGeometry
        );
        assert_eq!(lifecycle.phase(), WindowPhase::Closing);
    }

    #[test]
    fn quitting_transitions_exactly_once() {
        let mut lifecycle = loading();
        assert!(!lifecycle.is_quitting());
        assert_eq!(
            lifecycle.apply(LifecycleEvent::QuitRequested),
            LifecycleEffect::PersistGeometry
        );
        assert!(lifecycle.is_quitting());
        assert_eq!(
            lifecycle.apply(LifecycleEvent::QuitRequested),
            LifecycleEffect::None
        );
    }

    #[test]
    fn quitting_window_ignores_show_and_allows_close() {
        let mut lifecycle = loading();
        lifecycle.apply(LifecycleEvent::QuitRequested);

        assert_eq!(lifecycle.apply(LifecycleEvent::Show), LifecycleEffect::None);
        assert_eq!(
            lifecycle.apply(LifecycleEvent::CloseRequested {
                quit_on_close: false
            }),
            LifecycleEffect::AllowClose
        );
        lifecycle.apply(LifecycleEvent::Exited);
        assert_eq!(lifecycle.phase(), WindowPhase::Terminated);
        assert!(lifecycle.is_quitting());
    }
}
