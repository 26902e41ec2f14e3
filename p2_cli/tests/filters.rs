mod common;

use p2_core::AnyEmptyResult;

#[test]
fn write_file_is_unregistered_by_default() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let target = tmp.path().join("side-effect.txt");
	let template = common::write_file(
		tmp.path(),
		"t.tmpl",
		r#"{{ "payload" | write_file(target) }}"#,
	)?;

	common::p2_cmd()
		.arg("-t")
		.arg(&template)
		.arg("-f")
		.arg("json")
		.write_stdin(format!(r#"{{"target": {:?}}}"#, target.display().to_string()))
		.assert()
		.code(1);

	assert!(!target.exists());

	Ok(())
}

#[test]
fn enabled_write_file_writes_the_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let target = tmp.path().join("written.txt");
	let template = common::write_file(
		tmp.path(),
		"t.tmpl",
		r#"{{ "payload" | write_file(target) }}"#,
	)?;

	common::p2_cmd()
		.arg("-t")
		.arg(&template)
		.arg("-f")
		.arg("json")
		.arg("--enable-filters")
		.arg("write_file")
		.write_stdin(format!(r#"{{"target": {:?}}}"#, target.display().to_string()))
		.assert()
		.success()
		.stdout("payload");

	assert_eq!(std::fs::read_to_string(&target)?, "payload");

	Ok(())
}

#[test]
fn enabled_make_dirs_creates_directories() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let nested = tmp.path().join("one").join("two");
	let template = common::write_file(tmp.path(), "t.tmpl", "{{ DIR | make_dirs }}")?;

	common::p2_cmd()
		.env("DIR", &nested)
		.arg("-t")
		.arg(&template)
		.arg("--enable-filters=make_dirs")
		.assert()
		.success();

	assert!(nested.is_dir());

	Ok(())
}

#[test]
fn noop_filters_supersede_enabled_filters() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let target = tmp.path().join("never.txt");
	let template = common::write_file(
		tmp.path(),
		"t.tmpl",
		r#"{{ "payload" | write_file(target) }}"#,
	)?;

	common::p2_cmd()
		.arg("-t")
		.arg(&template)
		.arg("-f")
		.arg("json")
		.arg("--enable-filters=write_file")
		.arg("--enable-noop-filters")
		.write_stdin(format!(r#"{{"target": {:?}}}"#, target.display().to_string()))
		.assert()
		.success()
		.stdout("payload");

	assert!(!target.exists());

	Ok(())
}

#[test]
fn unknown_filter_is_a_configuration_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let template = common::write_file(tmp.path(), "t.tmpl", "unused")?;

	common::p2_cmd()
		.arg("-t")
		.arg(&template)
		.arg("--enable-filters=unknownname")
		.assert()
		.code(1)
		.stdout("")
		.stderr(predicates::str::contains(
			"does not support the `unknownname` filter",
		));

	Ok(())
}
