use super::*;
use crate::host::scheduler::ManualScheduler;
use crate::render::record::RecordingSurface;

type Engine = AnimationEngine<ManualScheduler, RecordingSurface>;

fn engine(seed: u64) -> Engine {
    AnimationEngine::with_seed(EngineConfig::default(), ManualScheduler::new(), seed).unwrap()
}

/// Fire the outstanding request, if any, like a host display refresh.
fn pump(e: &mut Engine) -> bool {
    if e.scheduler_mut().take_request() {
        e.on_frame().unwrap()
    } else {
        false
    }
}

#[test]
fn initialize_without_surface_is_noop() {
    let mut e = engine(1);
    e.initialize(None);
    assert_eq!(e.state(), RunState::Stopped);
    assert!(e.elements().is_empty());
    assert_eq!(e.scheduler().requested(), 0);
}

#[test]
fn initialize_generates_and_requests_one_frame() {
    let mut e = engine(1);
    e.initialize(Some(RecordingSurface::new(800.0, 600.0, 1.0)));
    assert_eq!(e.state(), RunState::Running);
    assert_eq!(e.elements().len(), 40);
    assert_eq!(e.epoch(), 1);
    assert_eq!(e.scheduler().requested(), 1);
    assert!(e.frame_requested());
}

#[test]
fn each_frame_renders_and_requests_exactly_one_more() {
    let mut e = engine(2);
    e.initialize(Some(RecordingSurface::new(300.0, 200.0, 1.0)));
    for i in 1..=5u64 {
        assert!(pump(&mut e));
        assert_eq!(e.frame_counter(), i);
        assert_eq!(e.scheduler().requested(), i + 1);
    }
    let (begun, ended) = e.surface().unwrap().frame_counts();
    assert_eq!((begun, ended), (5, 5));
}

#[test]
fn pause_and_resume_continue_the_counter() {
    let mut e = engine(3);
    e.initialize(Some(RecordingSurface::new(300.0, 200.0, 1.0)));
    for _ in 0..10 {
        pump(&mut e);
    }
    assert_eq!(e.frame_counter(), 10);

    e.set_running(false);
    // the already-issued request fires but does nothing
    for _ in 0..5 {
        assert!(!pump(&mut e));
    }
    assert_eq!(e.frame_counter(), 10);
    assert!(!e.scheduler().is_pending());

    e.set_running(true);
    assert!(pump(&mut e));
    assert_eq!(e.frame_counter(), 11);
}

#[test]
fn resume_while_request_outstanding_does_not_double_request() {
    let mut e = engine(4);
    e.initialize(Some(RecordingSurface::new(300.0, 200.0, 1.0)));
    e.set_running(false);
    e.set_running(true);
    e.set_running(true);
    assert_eq!(e.scheduler().requested(), 1);
}

#[test]
fn shutdown_is_terminal_and_idempotent() {
    let mut e = engine(5);
    e.initialize(Some(RecordingSurface::new(300.0, 200.0, 1.0)));
    pump(&mut e);
    e.shutdown();
    e.shutdown();
    assert_eq!(e.state(), RunState::ShutDown);
    assert_eq!(e.scheduler().cancelled(), 1);
    assert!(!e.scheduler().is_pending());

    e.set_running(true);
    assert_eq!(e.state(), RunState::ShutDown);
    assert!(!e.on_frame().unwrap());
    assert_eq!(e.frame_counter(), 1);
}

#[test]
fn resize_regenerates_with_new_epoch() {
    let mut e = engine(6);
    e.initialize(Some(RecordingSurface::new(800.0, 600.0, 1.0)));
    pump(&mut e);
    let old = e.elements().to_vec();

    e.surface_mut().unwrap().resize(400.0, 300.0, 2.0);
    e.on_resize();
    assert_eq!(e.epoch(), 2);
    assert_eq!(e.size(), SurfaceSize::new(400.0, 300.0, 2.0));
    assert_eq!(e.elements().len(), 40);
    assert!(e.elements().iter().all(|el| el.epoch == 2));
    assert_ne!(e.elements(), old.as_slice());
    assert_eq!(e.frame_counter(), 1);
    assert!(
        e.elements()
            .iter()
            .all(|el| el.base.x < 400.0 && el.base.y < 300.0)
    );
}

#[test]
fn pointer_updates_apply_on_next_update_only() {
    let mut e = engine(7);
    e.initialize(Some(RecordingSurface::new(800.0, 600.0, 1.0)));
    let target = e.elements()[0].display;
    let before = e.elements().to_vec();
    e.on_pointer_move(target.x, target.y);
    assert_eq!(e.elements(), before.as_slice());
    assert_eq!(e.pointer(), Some(target));

    e.on_pointer_move(f64::NAN, 1.0);
    assert_eq!(e.pointer(), None);
    e.on_pointer_move(target.x, target.y);
    e.clear_pointer();
    assert_eq!(e.pointer(), None);
}

#[test]
fn zero_sized_surface_never_panics() {
    let mut e = engine(8);
    e.initialize(Some(RecordingSurface::new(0.0, 0.0, 1.0)));
    e.on_pointer_move(0.0, 0.0);
    for _ in 0..100 {
        assert!(pump(&mut e));
    }
    for el in e.elements() {
        assert!(el.base.x >= -el.size && el.base.x <= el.size);
        assert!(el.base.y >= -el.size && el.base.y <= el.size);
    }
    assert!(e.surface().unwrap().commands().is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = EngineConfig {
        opacity: [0.5, 0.1],
        ..EngineConfig::default()
    };
    assert!(
        AnimationEngine::<ManualScheduler, RecordingSurface>::with_seed(
            cfg,
            ManualScheduler::new(),
            0
        )
        .is_err()
    );
}
