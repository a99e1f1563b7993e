use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use spool::actors::Narrator;
use spool::events::{Say, Terminate};
use spool::{ActorRef, Event, Lifecycle, Spool};

use crate::common::{Recorder, TIMEOUT, running, wait_within};

fn king(spool: &Spool) {
	spool
		.register(
			"king",
			Arc::new(|event: &dyn Event, spool: &Spool| {
				if event.is_terminal()
					&& let Some(me) = spool.lookup("king")
				{
					spool.submit(Say::spoken_by(me, "My kingdom!"));
				}
			}),
		)
		.unwrap();
}

#[test]
fn last_words_are_delivered_before_wait_returns() {
	let spool = running(1);
	let herald = Recorder::default();
	let heard = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&heard);
	king(&spool);
	spool.register("herald", herald.handle()).unwrap();
	spool
		.register(
			"chronicler",
			Arc::new(move |event: &dyn Event, spool: &Spool| {
				if let Some(say) = event.downcast_ref::<Say>() {
					let from_king = spool.lookup("king").is_some_and(|king| say.is_from(&king));
					sink.lock().push((say.message().to_owned(), from_king));
				}
			}),
		)
		.unwrap();

	spool.submit(Terminate::new("usurped"));
	let report = wait_within(&spool, TIMEOUT);

	assert_eq!(herald.seen(), vec!["Terminating: usurped", "Someone said something"]);
	assert_eq!(*heard.lock(), vec![("My kingdom!".to_string(), true)]);
	assert!(report.is_clean());
	assert_eq!(spool.lifecycle(), Lifecycle::Stopped);
}

#[test]
fn terminate_with_no_actors_returns_promptly() {
	let spool = running(2);
	let submission = spool.submit(Terminate::new("nobody home"));
	assert!(submission.terminal);
	assert_eq!(submission.deliveries, 0);

	let started = Instant::now();
	let report = wait_within(&spool, TIMEOUT);
	assert!(started.elapsed() < Duration::from_secs(2));
	assert_eq!(report.delivered, 0);
}

#[test]
fn repeated_waits_return_the_same_report() {
	let spool = running(2);
	let recorder = Recorder::default();
	spool.register("recorder", recorder.handle()).unwrap();
	spool.submit(Say::new("hey"));
	spool.submit(Terminate::new("done"));

	let first = wait_within(&spool, TIMEOUT);
	let second = wait_within(&spool, TIMEOUT);
	assert_eq!(first, second);
	assert_eq!(first.delivered, 2);
}

#[test]
fn second_terminate_while_draining_is_harmless() {
	let spool = Spool::new();
	let recorder = Recorder::default();
	spool.register("recorder", recorder.handle()).unwrap();

	spool.submit(Terminate::new("once"));
	let again = spool.submit(Terminate::new("twice"));
	assert!(again.is_accepted());

	spool.run_with(1).unwrap();
	wait_within(&spool, TIMEOUT);
	assert_eq!(recorder.seen(), vec!["Terminating: once", "Terminating: twice"]);
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for SharedBuf {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		self.0.lock().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}

#[test]
fn narrator_prints_every_line_including_last_words() {
	let spool = running(4);
	let out = SharedBuf::default();
	let narrator = Arc::new(Narrator::new(out.clone()).unwrap());
	king(&spool);
	let handle: ActorRef = narrator.clone();
	spool.register("narrator", handle).unwrap();

	spool.submit(Say::new("Long live the king"));
	spool.submit(Terminate::new("usurped"));
	wait_within(&spool, TIMEOUT);
	narrator.close().unwrap();

	let text = String::from_utf8(out.0.lock().clone()).unwrap();
	let mut lines: Vec<&str> = text.lines().collect();
	lines.sort_unstable();
	assert_eq!(lines, vec!["Long live the king", "My kingdom!"]);
}
