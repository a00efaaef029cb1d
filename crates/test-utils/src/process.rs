use std::io::Write;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Run `cmd` to completion, feeding `stdin` if given, and capture its output.
///
/// Returns `None` if the process is still running after `deadline`; it is
/// killed in that case.
pub fn run_with_deadline(
    cmd: &mut Command,
    stdin: Option<&[u8]>,
    deadline: Duration,
) -> Option<Output> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd.stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() });

    let mut child = cmd.spawn().expect("Failed to spawn process under test");
    if let Some(input) = stdin {
        let mut pipe = child.stdin.take().expect("stdin was piped");
        pipe.write_all(input).expect("Failed to write stdin");
    }

    if wait_until(&mut child, deadline).is_none() {
        let _ = child.kill();
        let _ = child.wait();
        return None;
    }

    Some(child.wait_with_output().expect("Failed to collect output"))
}

fn wait_until(child: &mut Child, deadline: Duration) -> Option<ExitStatus> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().expect("try_wait failed") {
            return Some(status);
        }
        if start.elapsed() > deadline {
            return None;
        }
        thread::sleep(Duration::from_millis(10));
    }
}
