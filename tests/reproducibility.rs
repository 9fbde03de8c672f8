// Per-worker random streams: the same seed gives the same hits, whatever
// order or thread the workers run on.
use ls_detector::step::{ParticleKind, Step, StepPoint, StepStatus, TrackInfo};
use ls_detector::units::EV;
use ls_detector::{Config, DetectorSession, HitsCollection, MemorySink};
use nalgebra::Point3;
use std::thread;

const WORKERS: usize = 4;
const PHOTONS_PER_EVENT: usize = 2_000;

fn session(seed: u64) -> DetectorSession {
    let config = Config {
        seed,
        overlap_check: false,
        ..Config::default()
    };
    let mut session = DetectorSession::new(config).unwrap();
    session.rebuild_if_dirty().unwrap();
    session
}

fn photon_steps(session: &DetectorSession) -> Vec<Step> {
    let world = session.world().unwrap();
    let store = world.store();
    let energies = [2.1 * EV, 2.7 * EV, 2.9 * EV, 3.4 * EV];
    (0..PHOTONS_PER_EVENT)
        .map(|i| {
            let copy_index = i % 2;
            let cathode = world.detector_units()[copy_index].photocathode.unwrap();
            let energy = energies[i % energies.len()];
            let time = 1.0 + i as f64 * 0.01;
            let pre = StepPoint::new(Point3::origin(), time, energy, StepStatus::GeomBoundary)
                .located_in(store, cathode);
            let post = StepPoint::new(Point3::origin(), time + 0.1, energy, StepStatus::PostStep)
                .located_in(store, cathode);
            Step {
                track: TrackInfo::secondary(100 + i as i32, 2, ParticleKind::OpticalPhoton, "Scintillation"),
                pre,
                post,
                energy_deposit: 0.0,
                is_first_step: false,
            }
        })
        .collect()
}

fn run_worker(session: &DetectorSession, worker_id: usize, steps: &[Step]) -> HitsCollection {
    let mut worker = session.worker(worker_id);
    let mut sink = MemorySink::new();
    worker.begin_event(worker_id as i32);
    for step in steps {
        worker.process_step(step);
    }
    worker.end_event(&mut sink).unwrap()
}

fn run_threaded(session: &DetectorSession, steps: &[Step]) -> Vec<HitsCollection> {
    thread::scope(|scope| {
        let handles: Vec<_> = (0..WORKERS)
            .map(|worker_id| scope.spawn(move || run_worker(session, worker_id, steps)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[test]
fn test_same_seed_same_hits_across_threads() {
    let _ = env_logger::builder().is_test(true).try_init();
    let first = session(42);
    let steps = photon_steps(&first);
    let threaded = run_threaded(&first, &steps);

    let second = session(42);
    // Same workers, run back to back on this thread in reverse order
    let mut sequential: Vec<_> = (0..WORKERS)
        .rev()
        .map(|worker_id| run_worker(&second, worker_id, &steps))
        .collect();
    sequential.reverse();

    assert_eq!(threaded, sequential);
    assert!(threaded.iter().all(|hits| !hits.photocathode.is_empty()));
}

#[test]
fn test_workers_draw_independent_streams() {
    let session = session(42);
    let steps = photon_steps(&session);
    let hits = run_threaded(&session, &steps);
    for a in 0..WORKERS {
        for b in a + 1..WORKERS {
            assert_ne!(hits[a], hits[b], "workers {} and {} coincide", a, b);
        }
    }
}

#[test]
fn test_different_seed_changes_hits() {
    let a = session(1);
    let b = session(2);
    let steps = photon_steps(&a);
    assert_ne!(run_worker(&a, 0, &steps), run_worker(&b, 0, &steps));
}

#[test]
fn test_rebuild_keeps_streams_reproducible() {
    let mut session = session(7);
    let before = run_worker(&session, 1, &photon_steps(&session));

    session.apply_command("/detector/setMovableAngle 90 deg").unwrap();
    session.rebuild_if_dirty().unwrap();
    session.apply_command("/detector/setMovableAngle 45 deg").unwrap();
    session.rebuild_if_dirty().unwrap();
    assert_eq!(session.world().unwrap().generation(), 2);

    let after = run_worker(&session, 1, &photon_steps(&session));
    assert_eq!(before, after);
}
