#!/usr/bin/env rust-script
//! ```cargo
//! [dependencies]
//! yansi = "0.5"
//! ```
extern crate yansi;
use std::process::Command;

macro_rules! run_command {
    ($cmd:expr , $($arg:expr),*) => (
        let mut command = command!($cmd, $($arg),*);
        let mut child = command.spawn().unwrap();
        let status = child.wait().unwrap();
        if !status.success() {
            print!("> {}",yansi::Paint::red("qualify terminates due to error"));
            std::process::exit(-1);
        }
    )
}

macro_rules! command {
    ($cmd:expr , $($arg:expr),*) => (
        {
            print!("\n> {}",yansi::Paint::yellow($cmd));
            let mut command = Command::new($cmd);
            $(
                print!(" {}",yansi::Paint::yellow(&$arg));
                command.arg($arg);
            )*
            print!("\n");
            command
        }
    )
}

#[rustfmt::skip]
fn main() {
    println!("Qualify hdbdecimal");

    // Format
    run_command!("cargo", "fmt", "--all", "--", "--check");

    // Build
    run_command!("cargo", "build", "--workspace");
    run_command!("cargo", "build", "--workspace", "--release");

    // Clippy
    run_command!("cargo", "clippy", "--all-targets", "--workspace", "--", "-D", "warnings");

    // doc
    run_command!("cargo", "doc", "--package", "hdbdecimal", "--no-deps");

    // Run tests
    run_command!("cargo", "test", "--workspace");
    run_command!("cargo", "test", "--workspace", "--release");

    // Smoke-test the binary: 123.4500 on the wire
    run_command!(
        "cargo", "run", "--package", "hdbdecimal_cli", "--", "decode",
        "44d61200000000000000000000003830"
    );

    // check git status
    let mut cmd = command!("git", "status", "-s");
    let child = cmd.stdout(std::process::Stdio::piped()).spawn().unwrap();
    let output = child.wait_with_output().unwrap();
    if output.stdout.len() > 0 {
        print!("> {}", yansi::Paint::red("there are unsubmitted files"));
        std::process::exit(-1);
    }

    println!("\n> all done :-)  Looks like you're ready to \"git push\"?");
}
