use super::*;

#[test]
fn pause_and_resume_toggle_between_stopped_and_running() {
    let s = RunState::default();
    assert_eq!(s, RunState::Stopped);
    assert_eq!(s.with_running(true), RunState::Running);
    assert_eq!(RunState::Running.with_running(false), RunState::Stopped);
}

#[test]
fn shut_down_absorbs_everything() {
    assert_eq!(RunState::ShutDown.with_running(true), RunState::ShutDown);
    assert_eq!(RunState::ShutDown.with_running(false), RunState::ShutDown);
    assert!(RunState::ShutDown.is_shut_down());
    assert!(!RunState::ShutDown.is_running());
}
