use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use protofield_testkit::fixture_arg;

static PROTOFIELD_BIN: OnceLock<PathBuf> = OnceLock::new();

/// Captured result of one `protofield` invocation.
pub(crate) struct Run {
	output: Output,
}

impl Run {
	pub(crate) fn code(&self) -> Option<i32> {
		self.output.status.code()
	}

	pub(crate) fn stdout(&self) -> String {
		String::from_utf8_lossy(&self.output.stdout).into_owned()
	}

	pub(crate) fn stderr(&self) -> String {
		String::from_utf8_lossy(&self.output.stderr).into_owned()
	}

	/// Assert success and return stdout.
	pub(crate) fn success(&self) -> String {
		assert!(self.output.status.success(), "protofield failed with status={}: {}", self.output.status, self.stderr());
		self.stdout()
	}

	/// Assert success and parse stdout as JSON.
	pub(crate) fn json(&self) -> serde_json::Value {
		serde_json::from_str(&self.success()).expect("stdout should be valid json")
	}

	/// Assert the run failed with status 1 and nothing on stdout, and return stderr.
	pub(crate) fn failure(&self) -> String {
		assert_eq!(self.code(), Some(1), "stdout: {}", self.stdout());
		assert!(self.output.stdout.is_empty(), "unexpected stdout: {}", self.stdout());
		self.stderr()
	}
}

pub(crate) fn protofield(args: &[&str]) -> Run {
	let output = Command::new(protofield_bin()).args(args).output().expect("protofield command executes");
	Run { output }
}

/// `protofield schema` against the shop schema fixture.
pub(crate) fn shop_schema_cmd(extra: &[&str]) -> Run {
	let schema = fixture_arg("shop_schema.json");
	let mut args = vec!["schema", schema.as_str()];
	args.extend_from_slice(extra);
	protofield(&args)
}

/// `protofield export` of an input fixture against the shop schema fixture.
pub(crate) fn shop_export(input: &str, extra: &[&str]) -> Run {
	let schema = fixture_arg("shop_schema.json");
	let input = fixture_arg(input);
	let mut args = vec!["export", schema.as_str(), input.as_str()];
	args.extend_from_slice(extra);
	protofield(&args)
}

fn protofield_bin() -> &'static PathBuf {
	PROTOFIELD_BIN.get_or_init(resolve_protofield_bin)
}

/// Cargo exports the binary path to integration tests only, so unit tests build it and
/// look for it beside their own `deps/` directory.
fn resolve_protofield_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_protofield") {
		return PathBuf::from(path);
	}

	let status = Command::new(env!("CARGO"))
		.current_dir(env!("CARGO_MANIFEST_DIR"))
		.args(["build", "--quiet", "--bin", "protofield"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build protofield binary");

	let test_exe = std::env::current_exe().expect("test executable path");
	let profile_dir = test_exe
		.parent()
		.and_then(|deps| deps.parent())
		.expect("test executable lives in <profile>/deps");
	profile_dir.join(format!("protofield{}", std::env::consts::EXE_SUFFIX))
}
