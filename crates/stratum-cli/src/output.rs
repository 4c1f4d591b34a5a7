//! The `Output`/`Console` split the corpus uses to keep a command's
//! business logic testable without redirecting real stdout (see
//! `spk-cli`'s `cmd_ls.rs`): commands print through this trait instead of
//! calling `println!` directly, so tests can swap in a `Vec`-backed
//! implementation and assert on it.

pub trait Output: Default {
    fn println(&mut self, line: String);
}

#[derive(Default)]
pub struct Console;

impl Output for Console {
    fn println(&mut self, line: String) {
        println!("{line}");
    }
}
