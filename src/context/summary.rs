use crate::terminal::{self, remove_ansi_escape, sanitize};

use super::Context;

/// Wide enough for the longest label, `Additional catkin Make Args:`, plus a space.
const LABEL_WIDTH: usize = 29;

impl Context {
    /// Renders a human readable summary of the context, for printing before a build.
    pub fn summary(&self) -> String {
        self.summary_with(terminal::colors_enabled())
    }

    pub(super) fn summary_with(&self, color: bool) -> String {
        let line = |label: &str, value: &str| render_line(label, value, color);

        let destdir = self
            .destdir
            .as_ref()
            .map(|destdir| destdir.to_string())
            .unwrap_or_else(|| String::from("None"));

        let groups = [
            vec![
                line("Workspace:", self.workspace.as_str()),
                line("Sourcespace:", self.source_space.as_str()),
                line("Buildspace:", self.build_space.as_str()),
                line("Develspace:", self.devel_space.as_str()),
                line("Installspace:", self.install_space.as_str()),
                line("DESTDIR:", &destdir),
            ],
            vec![
                line("Isolate Develspaces:", &self.isolate_devel.to_string()),
                line("Install Packages:", &self.install.to_string()),
                line("Isolate Installs:", &self.isolate_install.to_string()),
            ],
            vec![
                line("Additional CMake Args:", &join_args(&self.cmake_args)),
                line("Additional Make Args:", &join_args(&self.make_args)),
                line(
                    "Additional catkin Make Args:",
                    &join_args(&self.catkin_make_args),
                ),
            ],
        ];

        let max_length = groups
            .iter()
            .flatten()
            .map(|line| remove_ansi_escape(line).chars().count())
            .max()
            .unwrap_or_default();

        let divider = terminal::render(&format!("@{{pf}}{}@|", "-".repeat(max_length)), color);

        let mut summary = vec![divider.clone()];
        for group in groups {
            summary.extend(group);
            summary.push(divider.clone());
        }

        summary.join("\n")
    }
}

fn render_line(label: &str, value: &str, color: bool) -> String {
    terminal::render(
        &format!(
            "@{{cf}}{label:<width$}@|@{{yf}}{value}@|",
            value = sanitize(value),
            width = LABEL_WIDTH
        ),
        color,
    )
}

fn join_args(args: &[String]) -> String {
    match args.is_empty() {
        true => String::from("None"),
        false => args.join(", "),
    }
}
