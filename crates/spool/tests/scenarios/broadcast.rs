use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use rstest::rstest;
use spool::events::{Say, Terminate};
use spool::{ActorRef, Event, PushOutcome, Spool};

use crate::common::{Recorder, TIMEOUT, running, wait_within};

fn echo() -> ActorRef {
	Arc::new(|event: &dyn Event, spool: &Spool| {
		if event.downcast_ref::<Say>().is_some_and(|say| say.message() == "hey") {
			spool.submit(Say::new("hi"));
		}
	})
}

#[test]
fn echo_reply_reaches_the_logger_before_shutdown() {
	let spool = running(4);
	let logger = Recorder::default();
	spool.register("echo", echo()).unwrap();
	spool.register("logger", logger.handle()).unwrap();

	spool.submit(Say::new("hey"));
	spool.submit(Terminate::new("done"));
	let report = wait_within(&spool, TIMEOUT);

	assert_eq!(logger.count("Someone said something"), 2);
	assert_eq!(logger.count("Terminating: done"), 1);
	assert_eq!(logger.seen().len(), 3);
	// hey x2, hi x2, terminate x2
	assert_eq!(report.delivered, 6);
	assert!(report.is_clean());

	let late = spool.submit(Say::new("hey"));
	assert_eq!(late.outcome, PushOutcome::Dropped);
	assert_eq!(logger.seen().len(), 3);
}

#[test]
fn submit_with_no_actors_delivers_nothing() {
	let spool = running(2);
	let submission = spool.submit(Say::new("anyone?"));
	assert!(submission.is_accepted());
	assert_eq!(submission.deliveries, 0);

	spool.submit(Terminate::new("done"));
	assert_eq!(wait_within(&spool, TIMEOUT).delivered, 0);
}

#[test]
fn late_registration_misses_earlier_events() {
	let spool = Spool::new();
	let early = Recorder::default();
	let late = Recorder::default();

	spool.register("early", early.handle()).unwrap();
	spool.submit(Say::new("first"));
	spool.register("late", late.handle()).unwrap();
	spool.submit(Terminate::new("done"));

	spool.run_with(1).unwrap();
	wait_within(&spool, TIMEOUT);

	assert_eq!(early.seen(), vec!["Someone said something", "Terminating: done"]);
	assert_eq!(late.seen(), vec!["Terminating: done"]);
}

#[rstest]
#[case::single(1)]
#[case::pair(2)]
#[case::wide(8)]
fn terminate_reaches_every_actor_once(#[case] workers: usize) {
	let spool = running(workers);
	let recorders: Vec<Recorder> = (0..10).map(|_| Recorder::default()).collect();
	for (n, recorder) in recorders.iter().enumerate() {
		spool.register(format!("actor-{n}"), recorder.handle()).unwrap();
	}

	spool.submit(Terminate::new("die!"));
	wait_within(&spool, TIMEOUT);

	for recorder in &recorders {
		assert_eq!(recorder.seen(), vec!["Terminating: die!"]);
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(16))]

	#[test]
	fn every_registered_actor_sees_each_event_once(actors in 0usize..16, events in 0usize..8, workers in 1usize..4) {
		let spool = running(workers);
		let counts: Vec<Arc<AtomicUsize>> = (0..actors).map(|_| Arc::new(AtomicUsize::new(0))).collect();
		for (n, count) in counts.iter().enumerate() {
			let count = Arc::clone(count);
			spool
				.register(
					n.to_string(),
					Arc::new(move |event: &dyn Event, _: &Spool| {
						if event.is::<Say>() {
							count.fetch_add(1, Ordering::SeqCst);
						}
					}),
				)
				.unwrap();
		}

		for _ in 0..events {
			prop_assert_eq!(spool.submit(Say::new("tick")).deliveries, actors);
		}
		spool.submit(Terminate::new("done"));
		let report = wait_within(&spool, TIMEOUT);

		prop_assert_eq!(report.delivered, ((events + 1) * actors) as u64);
		for count in &counts {
			prop_assert_eq!(count.load(Ordering::SeqCst), events);
		}
	}
}
