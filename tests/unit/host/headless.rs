use super::*;
use crate::encode::sink::InMemorySink;
use crate::engine::state::RunState;
use crate::host::script::ScheduledEvent;

fn host(width: f64, height: f64) -> HeadlessHost {
    HeadlessHost::new(HeadlessOpts {
        width,
        height,
        seed: Some(11),
        ..HeadlessOpts::default()
    })
    .unwrap()
}

fn at(frame: u64, event: HostEvent) -> ScheduledEvent {
    ScheduledEvent { frame, event }
}

#[test]
fn new_host_is_running_with_one_request() {
    let h = host(64.0, 48.0);
    assert_eq!(h.engine().state(), RunState::Running);
    assert!(h.engine().scheduler().is_pending());
    assert_eq!(h.engine().elements().len(), 40);
}

#[test]
fn run_without_events_renders_every_frame() {
    let mut h = host(64.0, 48.0);
    let mut sink = InMemorySink::new();
    let stats = h.run(5, &HostScript::default(), &mut sink).unwrap();

    assert_eq!(stats.rendered, 5);
    assert_eq!(stats.skipped, 0);
    assert_eq!(h.engine().frame_counter(), 5);

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (64, 48));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
}

#[test]
fn hidden_page_holds_last_frame_and_resumes_counter() {
    let mut h = host(32.0, 32.0);
    let script = HostScript::new(vec![
        at(2, HostEvent::Visibility { visible: false }),
        at(5, HostEvent::Visibility { visible: true }),
    ]);
    let mut sink = InMemorySink::new();
    let stats = h.run(8, &script, &mut sink).unwrap();

    // frames 0,1 render; 2 consumes the request while paused; 3,4 idle; 5.. render again
    assert_eq!(stats.rendered, 5);
    assert_eq!(stats.skipped, 3);
    assert_eq!(stats.pushed, 8);
    assert_eq!(h.engine().frame_counter(), 5);

    let frames = sink.frames();
    assert_eq!(frames[2].1, frames[1].1);
    assert_eq!(frames[4].1, frames[1].1);
}

#[test]
fn resize_event_reallocates_surface_and_starts_new_epoch() {
    let mut h = host(80.0, 60.0);
    let script = HostScript::new(vec![at(
        1,
        HostEvent::Resize {
            width: 40.0,
            height: 30.0,
            scale: 2.0,
        },
    )]);
    let mut sink = InMemorySink::new();
    let stats = h.run(3, &script, &mut sink).unwrap();

    assert_eq!(stats.resizes, 1);
    assert_eq!(h.engine().epoch(), 2);
    let last = &sink.frames()[2].1;
    assert_eq!((last.width, last.height), (80, 60));
    assert_eq!(h.engine().size().width, 40.0);
}

#[test]
fn pointer_events_reach_the_engine() {
    let mut h = host(32.0, 32.0);
    h.apply(&HostEvent::PointerMove { x: 4.0, y: 5.0 }).unwrap();
    assert_eq!(h.engine().pointer().map(|p| (p.x, p.y)), Some((4.0, 5.0)));
    h.apply(&HostEvent::PointerLeave).unwrap();
    assert_eq!(h.engine().pointer(), None);
}

#[test]
fn zero_sized_surface_skips_frames() {
    let mut h = host(0.0, 0.0);
    let mut sink = InMemorySink::new();
    let stats = h.run(3, &HostScript::default(), &mut sink).unwrap();
    assert_eq!(stats.rendered, 0);
    assert_eq!(stats.skipped, 3);
    assert!(sink.frames().is_empty());
}
