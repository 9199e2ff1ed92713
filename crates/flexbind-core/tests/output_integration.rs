//! Output file handling across whole generation runs

use flexbind_core::{write_output, Generator, GeneratorConfig, WriteOutcome};
use std::fs;
use tempfile::TempDir;

const METADATA: &str = "<signatures>\
    <enum name='FLEX_WRAP_NO_WRAP' value='1'/>\
    <enum name='FLEX_WRAP_WRAP' value='2'/>\
    <function name='flex_item_get_wrap'><arg type='^{flex_item=}'/><retval type='i'/></function>\
    <function name='flex_item_set_wrap'><arg type='^{flex_item=}'/><arg type='i'/></function>\
    </signatures>";

#[test]
fn test_rerun_on_unchanged_metadata_leaves_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("base.cs");
    let generator = Generator::new(GeneratorConfig::default()).unwrap();

    let first = generator.generate(METADATA).unwrap();
    assert_eq!(write_output(&path, &first.source).unwrap(), WriteOutcome::Written);
    let modified = fs::metadata(&path).unwrap().modified().unwrap();

    let second = generator.generate(METADATA).unwrap();
    assert_eq!(write_output(&path, &second.source).unwrap(), WriteOutcome::Unchanged);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);
    assert_eq!(fs::read_to_string(&path).unwrap(), first.source);
}

#[test]
fn test_failed_generation_keeps_previous_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("base.cs");
    fs::write(&path, "previous").unwrap();

    let generator = Generator::new(GeneratorConfig::default()).unwrap();
    let result = generator
        .generate("<signatures><enum name='NOT_FLEX' value='1'/></signatures>")
        .and_then(|generated| write_output(&path, &generated.source));

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
}

#[test]
fn test_overwrites_stale_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("base.cs");
    fs::write(&path, "stale").unwrap();

    let generated = Generator::new(GeneratorConfig::default())
        .unwrap()
        .generate(METADATA)
        .unwrap();
    assert_eq!(write_output(&path, &generated.source).unwrap(), WriteOutcome::Written);

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("        NoWrap = 1,\n        Wrap = 2,\n"));
    assert!(written.contains("public Wrap Wrap"));
}
