use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Input for the main loop. The form only changes on key presses; ticks
/// expire flash messages and resizes force a redraw.
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Merges terminal input with a fixed tick. The reader task stops when the
/// handler is dropped.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    task: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(pump(tx, Duration::from_millis(tick_rate_ms)));
        EventHandler { rx, task }
    }

    pub async fn next(&mut self) -> Event {
        self.rx.recv().await.unwrap_or(Event::Tick)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn pump(tx: mpsc::UnboundedSender<Event>, tick_rate: Duration) {
    let mut reader = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);

    loop {
        let event = tokio::select! {
            maybe = reader.next() => match maybe {
                Some(Ok(raw)) => match translate(raw) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(_)) => continue,
                None => break,
            },
            _ = ticks.tick() => Event::Tick,
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}

fn translate(raw: TermEvent) -> Option<Event> {
    match raw {
        // Press only; Windows also reports releases
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        TermEvent::Resize(..) => Some(Event::Resize),
        _ => None,
    }
}
