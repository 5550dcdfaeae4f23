use std::time::Instant;

use resplink_client::args;

use crate::cmd::{parse_duration, PingArgs};
use crate::exit::{client_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_pings, OutputFormat, PingSample};

pub fn run(args: PingArgs, format: OutputFormat) -> CliResult<i32> {
    if args.count == 0 {
        return Err(CliError::new(USAGE, "--count must be at least 1"));
    }
    let interval = parse_duration(&args.interval)?;
    let client = args.link.open()?;

    let mut samples = Vec::with_capacity(args.count as usize);
    for seq in 1..=args.count {
        if seq > 1 && !interval.is_zero() {
            std::thread::sleep(interval);
        }
        let started = Instant::now();
        let reply: String = client
            .query(&args!["PING"])
            .map_err(|err| client_error(&format!("ping {seq} failed"), err))?;
        samples.push(PingSample::new(seq, reply, started.elapsed()));
    }

    print_pings(&args.link.target, &samples, format);
    Ok(SUCCESS)
}
