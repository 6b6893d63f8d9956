use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn solang_cmd(cwd: &Path) -> Command {
	let mut cmd = Command::new(get_cargo_bin("solang"));
	cmd.current_dir(cwd)
		.env("NO_COLOR", "1")
		.env_remove("SOLANG_KEY")
		.env_remove("SOLANG_TOKEN")
		.env_remove("RUST_LOG");
	cmd
}

/// Write `a<id>.html` answer bodies into `dir`.
pub fn cache_answers(dir: &Path, answers: &[(u64, &str)]) -> std::io::Result<()> {
	std::fs::create_dir_all(dir)?;
	for (answer_id, body) in answers {
		std::fs::write(dir.join(format!("a{answer_id}.html")), body)?;
	}

	Ok(())
}
