use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::Dispatch;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

use organise_downloads::{classify, DirectoryEntry, ExclusionSet, MoveTargets, Mover};

/// A simple writer that appends written bytes into an in-memory Vec<u8>.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn dispatch_into(buf: &Arc<Mutex<Vec<u8>>>, json: bool) -> Dispatch {
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let filter = EnvFilter::new("debug");
    if json {
        let layer = tsfmt::layer().json().with_writer(make_writer);
        Dispatch::new(registry().with(filter).with(layer))
    } else {
        let layer = tsfmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(make_writer);
        Dispatch::new(registry().with(filter).with(layer))
    }
}

fn contents(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    let guard = buf.lock().unwrap();
    String::from_utf8_lossy(&guard[..]).to_string()
}

#[test]
fn json_lines_carry_structured_fields() {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let dispatch = dispatch_into(&buf, true);
    let excluded: ExclusionSet = [".bak"].into_iter().collect();
    let entries = [DirectoryEntry::file("notes.bak"), DirectoryEntry::file("a.txt")];

    classify(&entries, &excluded, &dispatch);

    let text = contents(&buf);
    let events: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("each log line is JSON"))
        .collect();
    let excluded_event = events
        .iter()
        .find(|e| e["fields"]["message"] == "excluded")
        .unwrap_or_else(|| panic!("no 'excluded' event in: {text}"));
    assert_eq!(excluded_event["fields"]["file"], "notes.bak");
    assert_eq!(excluded_event["fields"]["extension"], ".bak");
    assert_eq!(excluded_event["level"], "DEBUG");
}

#[test]
fn separate_handles_do_not_share_output() {
    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));
    let excluded: ExclusionSet = [".pdf", ".png"].into_iter().collect();

    classify(&[DirectoryEntry::file("one.pdf")], &excluded, &dispatch_into(&first, false));
    classify(&[DirectoryEntry::file("two.png")], &excluded, &dispatch_into(&second, false));

    let first = contents(&first);
    let second = contents(&second);
    assert!(first.contains("one.pdf"), "got: {first}");
    assert!(second.contains("two.png"), "got: {second}");
    assert!(!second.contains("one.pdf"));
    assert!(!first.contains("two.png"));
}

#[test]
fn mover_thread_logs_to_the_given_handle() {
    let temp = assert_fs::TempDir::new().unwrap();
    std::fs::write(temp.path().join("a.txt"), "a").unwrap();
    let buf = Arc::new(Mutex::new(Vec::new()));
    let targets: MoveTargets = [("txt_files", ["a.txt"])].into_iter().collect();

    let handle = Mover::new(temp.path())
        .with_logger(dispatch_into(&buf, false))
        .spawn(targets)
        .unwrap();
    handle.join().unwrap();

    let text = contents(&buf);
    assert!(text.contains("processing"), "got: {text}");
    assert!(text.contains("moved_count=1"), "got: {text}");
}
