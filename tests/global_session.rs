//! Tests for the process-wide session.
//!
//! Everything lives in one test because the session is shared by every
//! thread of this test binary.

mod common;

use argsift::args::MemoryCapabilities;
use argsift::global;
use common::{at, write_file};
use tempfile::TempDir;

#[test]
fn process_wide_session_lifecycle() {
    // Nothing parsed yet.
    assert_eq!(global::program_name(), None);
    assert_eq!(global::positional_count(), 0);
    assert!(!global::has_flag("f"));

    global::parse(["test", "arg1", "-f", "--p=value"]);
    assert_eq!(global::program_name().as_deref(), Some("test"));
    assert_eq!(global::positional_count(), 1);
    assert_eq!(global::positional(0).as_deref(), Some("arg1"));
    assert_eq!(global::positional(1), None);
    assert!(global::has_flag("f"));
    assert_eq!(global::param("p").as_deref(), Some("value"));

    // Queries can run side by side.
    std::thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| (global::positional(0), global::has_flag("f"))))
            .collect();
        for reader in readers {
            assert_eq!(reader.join().unwrap(), (Some("arg1".to_string()), true));
        }
    });

    // Static storage owns no heap memory: release leaves results in place.
    global::release();
    assert_eq!(global::program_name().as_deref(), Some("test"));
    assert_eq!(global::positional_count(), 1);
    assert!(global::has_flag("f"));
    assert_eq!(global::param("p").as_deref(), Some("value"));

    // Static by default: response files are skipped.
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "args.rsp", "from-file");
    global::parse(vec!["test".to_string(), at(&file)]);
    assert_eq!(global::positional_count(), 0);
    assert_eq!(
        global::with_session(|s| s.diagnostics().len()),
        Some(1)
    );

    // An incomplete capability set still means static.
    global::configure_memory(MemoryCapabilities {
        alloc: true,
        realloc: false,
        release: true,
    });
    global::parse(vec!["test".to_string(), at(&file)]);
    assert_eq!(global::positional_count(), 0);

    global::configure_memory(MemoryCapabilities::heap());
    global::parse(vec!["test".to_string(), at(&file)]);
    assert_eq!(global::positional(0).as_deref(), Some("from-file"));

    global::release();
    assert_eq!(global::program_name(), None);
    assert_eq!(global::positional_count(), 0);
    assert_eq!(global::with_session(|s| s.positional_count()), None);

    // Safe to release twice.
    global::release();
}
