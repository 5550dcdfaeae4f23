use resplink_client::{RetryPolicy, DEFAULT_MAX_READ_ATTEMPTS, DEFAULT_SETTLE_DELAY};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("resplink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: resplink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "build_target: {}",
        option_env!("RESPLINK_BUILD_TARGET").unwrap_or("unknown")
    );
    println!(
        "build_profile: {}",
        option_env!("RESPLINK_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!("git_hash: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("transports: serial, tcp");
    println!(
        "defaults: max_read_attempts={}, settle_delay={}ms, backoff_budget={}ms",
        DEFAULT_MAX_READ_ATTEMPTS,
        DEFAULT_SETTLE_DELAY.as_millis(),
        RetryPolicy::default().worst_case_backoff().as_millis()
    );

    Ok(SUCCESS)
}
