use std::collections::BTreeMap;
use std::{env, fs, process};

use allowlist_signer::{generate_key, key_from_hex, sign_allowlist, signer_address};

const KEY_ENV_VAR: &str = "ALLOWLIST_SIGNER_KEY";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("generate-key") => {
            let key = generate_key()?;
            // Printed exactly once for the operator; the key is not
            // written anywhere else
            println!("signing key:    {}", hex::encode(key.to_bytes()));
            println!("signer address: {}", signer_address(&key).to_hex());
            Ok(())
        }
        Some("sign") if args.len() == 2 => {
            let raw_key = env::var(KEY_ENV_VAR)
                .map_err(|_| format!("{} is not set", KEY_ENV_VAR))?;
            let key = key_from_hex(&raw_key)?;

            let input = fs::read_to_string(&args[1])?;
            let addresses: Vec<String> = input
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();

            let mut entries = BTreeMap::new();
            for entry in sign_allowlist(&key, &addresses) {
                let entry = entry?;
                entries.insert(entry.address, entry.signature.to_hex());
            }
            println!("{}", serde_json::to_string_pretty(&entries)?);
            Ok(())
        }
        _ => Err("usage: allowlist-signer generate-key | sign <addresses-file>".into()),
    }
}
