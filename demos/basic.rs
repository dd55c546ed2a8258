//! Walk through the main entry points.
//!
//! Run with: cargo run --example basic

use catch_this::{attempt, catch, catching, run, run_async, throw, Error, Outcome};
use std::io;

#[catching]
fn read_config(path: &str) -> io::Result<String> {
    std::fs::read_to_string(path)
}

fn checked_ratio(a: u32, b: u32) -> Outcome<u32> {
    catch(|| {
        if b == 0 {
            throw!("ratio {}/{} is undefined", a, b);
        }
        Ok::<_, Error>(a / b)
    })
}

fn main() {
    // Test 1: panics become failures
    let outcome = run(|| -> Vec<u8> { panic!("decoder crashed") });
    println!("run + panic        -> {}", outcome.as_ref().map(|v| v.len()));

    // Test 2: `?` raises inside catch
    let port: Outcome<u16> = attempt! { try { "80a".parse::<u16>()? } };
    println!("attempt + ?        -> {}", port);

    // Test 3: fall back through alternatives
    let ratio = checked_ratio(1, 0).or_catch(|| checked_ratio(9, 3).into_result());
    println!("or_catch           -> {}", ratio);

    // Test 4: attribute on a function
    match read_config("/definitely/not/here.toml") {
        Outcome::Ok(text) => println!("config             -> {} bytes", text.len()),
        Outcome::Err(e) => println!("config             -> {} ({:?})", e, e.kind()),
    }

    // Test 5: deferred, driven to completion without a runtime
    let answer = futures_util::FutureExt::now_or_never(run_async(|| async { 6 * 7 }))
        .expect("ready future");
    println!("run_async          -> {}", answer);
}
