//! Fixture helpers shared by the protofield crates' tests.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Fixture path rendered as a command-line argument.
pub fn fixture_arg(name: &str) -> String {
	fixture_path(name).to_string_lossy().into_owned()
}

/// Read a schema or input fixture as UTF-8 text.
pub fn fixture_text(name: &str) -> String {
	let path = fixture_path(name);
	std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("fixture {} should be readable: {err}", path.display()))
}

/// Read and parse a JSON input fixture.
pub fn fixture_json(name: &str) -> serde_json::Value {
	serde_json::from_str(&fixture_text(name)).unwrap_or_else(|err| panic!("fixture {name} should be valid json: {err}"))
}
