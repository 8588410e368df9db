use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tree_set::{OrderedSet, SetError};

/// A writer that keeps everything the subscriber formats.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

fn logged<F: FnOnce()>(f: F) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    let bytes = capture.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn view_mutations_are_traced() {
    let set: OrderedSet<_> = (0..10).collect();
    let view = set.between(2, 6);

    let out = logged(|| {
        assert_eq!(view.add(7), Err(SetError::OutOfRange));
        assert_eq!(view.add(2), Ok(false));
        assert!(view.remove(&3));
        view.clear();
    });

    assert!(out.contains("rejected an item outside the view's bounds"));
    assert!(out.contains("add through view") && out.contains("added=false"));
    assert!(out.contains("remove through view") && out.contains("removed=true"));
    assert!(out.contains("clear through view") && out.contains("removed=3"));
    assert_eq!(set.to_vec(), [0, 1, 6, 7, 8, 9]);
}

#[test]
fn set_mutations_are_traced() {
    let mut set = OrderedSet::new();

    let out = logged(|| {
        set.add(2);
        set.add(1);
        set.add(3);
        set.remove(&2);
    });

    assert!(out.contains("added=true"));
    assert!(out.contains("spliced in-order successor"));
    assert!(out.contains("removed=true"));
}
