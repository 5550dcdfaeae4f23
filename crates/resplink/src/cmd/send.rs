use resplink_client::{Arg, ClientError, Value};
use tracing::debug;

use crate::cmd::SendArgs;
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{print_reply, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let client = args.link.open()?;
    let argv: Vec<Arg> = args.command.iter().map(Arg::from).collect();
    let verb = args.command.join(" ");

    debug!(link = %args.link.target, command = %verb, "sending command");
    match client.query::<Value>(&argv) {
        Ok(reply) => {
            print_reply(&args.link.target, &verb, &reply, format);
            Ok(SUCCESS)
        }
        Err(ClientError::NilReply) => {
            // A null reply is still a reply: show it, then signal it.
            print_reply(&args.link.target, &verb, &Value::Nil, format);
            Err(client_error("send", ClientError::NilReply))
        }
        Err(err) => Err(client_error("send failed", err)),
    }
}
