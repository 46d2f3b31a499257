use anyhow::Context;
use clap::{Parser, Subcommand};
use dcp_rs::dcp::block::{IpParameter, NameOfStation};
use dcp_rs::logging::{log_frame_hex, log_warn};
use dcp_rs::util::hex::{decode_hex, encode_hex};
use dcp_rs::{init_logger, log_info, DeviceRegistry, Frame, MacAddr};
use std::net::Ipv4Addr;

#[derive(Parser)]
#[command(name = "dcp-rs")]
#[command(about = "CLI tool for PROFINET DCP frames")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an identify-all request as hex
    Identify {
        #[arg(short, long)]
        source: MacAddr,
        /// Transaction id, decimal or 0x-prefixed hex; random when omitted
        #[arg(short, long, value_parser = parse_xid)]
        xid: Option<u32>,
    },
    /// Print a set request for IP address, mask and gateway as hex
    SetIp {
        #[arg(short, long)]
        destination: MacAddr,
        #[arg(short, long)]
        source: MacAddr,
        #[arg(long)]
        ip: Ipv4Addr,
        #[arg(long)]
        mask: Ipv4Addr,
        #[arg(long, default_value = "0.0.0.0")]
        gateway: Ipv4Addr,
        /// Keep the setting across power cycles
        #[arg(long)]
        permanent: bool,
    },
    /// Print a set request for the station name as hex
    SetName {
        #[arg(short, long)]
        destination: MacAddr,
        #[arg(short, long)]
        source: MacAddr,
        name: String,
        #[arg(long)]
        permanent: bool,
    },
    /// Decode a captured frame and print it as JSON
    Decode { hex: String },
    /// Collect identify responses to a request and print the device table as JSON
    Collect {
        /// Transaction id of the identify request, decimal or 0x-prefixed hex
        #[arg(short, long, value_parser = parse_xid)]
        xid: u32,
        frames: Vec<String>,
    },
}

fn parse_xid(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid xid {s}: {e}"))
}

fn qualifier(permanent: bool) -> u16 {
    u16::from(permanent)
}

fn print_frame(frame: &Frame) -> anyhow::Result<()> {
    let bytes = frame.encode()?;
    log_frame_hex("Encoded frame", &bytes);
    println!("{}", encode_hex(&bytes));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Commands::Identify { source, xid } => {
            let frame = match xid {
                Some(xid) => Frame::identify_request_with_xid(source, xid),
                None => Frame::identify_request(source),
            };
            log_info(&format!("Identify request xid 0x{:08X}", frame.telegram.xid));
            print_frame(&frame)?;
        }
        Commands::SetIp {
            destination,
            source,
            ip,
            mask,
            gateway,
            permanent,
        } => {
            let block = IpParameter::with_qualifier(ip, mask, gateway, qualifier(permanent));
            let frame = Frame::set_ip_parameter_request(destination, source, block);
            log_info(&format!("Set IP {ip}/{mask} via {gateway} on {destination}"));
            print_frame(&frame)?;
        }
        Commands::SetName {
            destination,
            source,
            name,
            permanent,
        } => {
            let block = NameOfStation::with_qualifier(qualifier(permanent), name);
            let frame = Frame::set_name_of_station_request(destination, source, block);
            print_frame(&frame)?;
        }
        Commands::Decode { hex } => {
            let bytes = decode_hex(&hex).context("reading frame hex")?;
            log_frame_hex("Received frame", &bytes);
            let frame = Frame::decode(&bytes)?;
            println!("{}", serde_json::to_string_pretty(&frame)?);
        }
        Commands::Collect { xid, frames } => {
            let registry = DeviceRegistry::new();
            for hex in &frames {
                let bytes = decode_hex(hex).context("reading frame hex")?;
                match Frame::decode(&bytes) {
                    Ok(frame) => {
                        registry.observe(xid, frame).await;
                    }
                    Err(e) => log_warn(&format!("Dropping frame: {e}")),
                }
            }
            log_info(&format!("{} device(s) answered", registry.len().await));
            println!("{}", registry.to_json().await?);
        }
    }

    Ok(())
}
