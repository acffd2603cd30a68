//! CLI definitions using clap.
//!
//! One invocation wraps one command:
//!
//! ```text
//! alertr <sender> (--email | --sms --carrier <name>) <receiver> [--] <command>...
//! ```
//!
//! Everything after the receiver is the command to run. Delivery mode
//! and recipient checks that need the gateway table happen in
//! [`Cli::recipient`], after parsing.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::error::{AlertrError, Result};
use crate::notify::carrier::{Carrier, format_sms_number};
use crate::notify::{DeliveryMode, Recipient};
use crate::runner::TargetCommand;

/// alertr - run a command with retries and get told how it went
#[derive(Parser, Debug)]
#[command(name = "alertr")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true)))]
pub struct Cli {
    /// Email account the alert is sent from
    pub sender: String,

    /// Deliver alerts as plain email
    #[arg(long, group = "mode")]
    pub email: bool,

    /// Deliver alerts as SMS through a carrier gateway
    #[arg(long, group = "mode")]
    pub sms: bool,

    /// Receiver's mobile carrier, required for --sms
    #[arg(long, value_parser = Carrier::from_name)]
    pub carrier: Option<Carrier>,

    /// Email address, or phone number for --sms
    pub receiver: String,

    /// Command to run, with its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub cmd: Vec<String>,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The selected delivery mode. The arg group guarantees exactly one
    /// of the flags is set.
    pub fn mode(&self) -> DeliveryMode {
        if self.sms { DeliveryMode::Sms } else { DeliveryMode::Email }
    }

    /// Resolve the receiver argument into a deliverable address.
    ///
    /// SMS mode turns a phone number into a gateway address; email mode
    /// passes the address through after a sanity check.
    pub fn recipient(&self) -> Result<Recipient> {
        match self.mode() {
            DeliveryMode::Sms => {
                let carrier = self.carrier.ok_or(AlertrError::CarrierRequired)?;
                let address = format_sms_number(&self.receiver, carrier.gateway())?;
                Ok(Recipient { address, mode: DeliveryMode::Sms })
            }
            DeliveryMode::Email => {
                if !self.receiver.contains('@') {
                    return Err(AlertrError::InvalidRecipient(format!(
                        "'{}' does not look like an email address",
                        self.receiver
                    )));
                }
                Ok(Recipient {
                    address: self.receiver.clone(),
                    mode: DeliveryMode::Email,
                })
            }
        }
    }

    /// The command to wrap.
    pub fn target_command(&self) -> Result<TargetCommand> {
        TargetCommand::new(self.cmd.clone())
    }
}
