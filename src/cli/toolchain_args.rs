//! Pulls the `--cmake-args`, `--make-args` & `--catkin-make-args` bundles
//! out of a command line before clap sees it.
//!
//! These bundles are mostly flags meant for other tools (e.g. `-DFOO=ON`,
//! `-j4`) so clap can't be trusted to parse them.  Each bundle takes every
//! argument after it up to the next bundle flag, a `--`, or the end.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolchainArgs {
    pub cmake_args: Vec<String>,
    pub make_args: Vec<String>,
    pub catkin_make_args: Vec<String>,
}

#[derive(Clone, Copy)]
enum Bundle {
    CMake,
    Make,
    CatkinMake,
}

impl Bundle {
    fn from_flag(arg: &str) -> Option<Bundle> {
        match arg {
            "--cmake-args" => Some(Bundle::CMake),
            "--make-args" => Some(Bundle::Make),
            "--catkin-make-args" => Some(Bundle::CatkinMake),
            _ => None,
        }
    }
}

impl ToolchainArgs {
    pub fn is_empty(&self) -> bool {
        self.cmake_args.is_empty() && self.make_args.is_empty() && self.catkin_make_args.is_empty()
    }

    fn bundle_mut(&mut self, bundle: Bundle) -> &mut Vec<String> {
        match bundle {
            Bundle::CMake => &mut self.cmake_args,
            Bundle::Make => &mut self.make_args,
            Bundle::CatkinMake => &mut self.catkin_make_args,
        }
    }
}

/// Splits `args` into the arguments for clap and the toolchain bundles.
pub fn extract(args: Vec<String>) -> (Vec<String>, ToolchainArgs) {
    let mut remaining = Vec::with_capacity(args.len());
    let mut toolchain_args = ToolchainArgs::default();
    let mut current = None;

    for arg in args {
        if let Some(bundle) = Bundle::from_flag(&arg) {
            current = Some(bundle);
            continue;
        }
        match current {
            Some(_) if arg == "--" => current = None,
            Some(bundle) => toolchain_args.bundle_mut(bundle).push(arg),
            None => remaining.push(arg),
        }
    }

    (remaining, toolchain_args)
}
