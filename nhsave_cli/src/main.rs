use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use nhsave::{Revision, SaveHeader};

#[derive(Parser, Debug)]
struct ActionDecrypt {
    /// Path to the 0x300-byte header file (e.g. main.dat.header)
    #[arg(index = 1)]
    header: PathBuf,

    /// Encrypted save file
    #[arg(index = 2)]
    input: PathBuf,

    /// Output path. Defaults to <input>.dec
    #[arg(index = 3)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ActionEncrypt {
    /// Decrypted save file
    #[arg(index = 1)]
    input: PathBuf,

    /// Output path. Defaults to <input>.enc
    #[arg(index = 2)]
    output: Option<PathBuf>,

    /// Seed for the fresh entropy pool. Defaults to a time-derived value
    #[arg(short, long)]
    seed: Option<u32>,

    /// Existing header to copy the version block from; zeroed when omitted
    #[arg(long)]
    header_in: Option<PathBuf>,

    /// Where to write the generated header. Defaults to <output>.header
    #[arg(long)]
    header_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ActionHash {
    /// Decrypted save file
    #[arg(index = 1)]
    input: PathBuf,

    /// Registered layout name. Defaults to the input file name
    #[arg(short, long)]
    file_name: Option<String>,

    /// Game revision the file was written by
    #[arg(short, long, default_value = "1.4.0")]
    revision: String,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Decrypt a save file using its header
    Decrypt(ActionDecrypt),
    /// Encrypt a save file, generating a fresh header
    Encrypt(ActionEncrypt),
    /// Check every declared hash region of a decrypted file
    Verify(ActionHash),
    /// Recompute and rewrite every declared hash region in place
    Rehash(ActionHash),
}

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    #[command(subcommand)]
    action: Action,
}

fn main() -> Result<(), nhsave::Error> {
    let args = Args::parse();

    match args.action {
        Action::Decrypt(args) => decrypt(args),
        Action::Encrypt(args) => encrypt(args),
        Action::Verify(args) => verify(args),
        Action::Rehash(args) => rehash(args),
    }
}

fn decrypt(args: ActionDecrypt) -> Result<(), nhsave::Error> {
    let header = fs::read(&args.header)?;
    let mut data = fs::read(&args.input)?;
    nhsave::decrypt(&header, &mut data)?;

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("dec"));
    fs::write(&output, &data)?;
    println!("decrypted {} bytes to {}", data.len(), output.display());
    Ok(())
}

fn encrypt(args: ActionEncrypt) -> Result<(), nhsave::Error> {
    let data = fs::read(&args.input)?;

    let version_info = match &args.header_in {
        Some(path) => {
            let header = SaveHeader::parse(&fs::read(path)?)?;
            header.version_info.to_vec()
        }
        None => vec![],
    };
    let seed = args.seed.unwrap_or_else(time_seed);

    let enc = nhsave::encrypt(&data, seed, &version_info)?;

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("enc"));
    let header_out = args.header_out.unwrap_or_else(|| {
        let mut path = output.as_os_str().to_owned();
        path.push(".header");
        PathBuf::from(path)
    });
    fs::write(&output, &enc.data)?;
    fs::write(&header_out, &enc.header)?;
    println!(
        "encrypted {} bytes to {} (seed {seed:#010X}, header {})",
        enc.data.len(),
        output.display(),
        header_out.display()
    );
    Ok(())
}

fn lookup(args: &ActionHash) -> Result<&'static nhsave::FileHashDetails, nhsave::Error> {
    let name = match &args.file_name {
        Some(name) => name.clone(),
        None => args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    let revision = Revision::from_str(&args.revision)?;
    revision
        .hash_info()
        .get_file(&name)
        .ok_or(nhsave::Error::UnknownFile(name))
}

fn verify(args: ActionHash) -> Result<(), nhsave::Error> {
    let data = fs::read(&args.input)?;
    let details = lookup(&args)?;

    let invalid = details.find_invalid(&data)?;
    for region in details.regions {
        let status = if invalid.contains(region) { "FAIL" } else { "ok" };
        println!("{region} {status}");
    }
    if !invalid.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn rehash(args: ActionHash) -> Result<(), nhsave::Error> {
    let mut data = fs::read(&args.input)?;
    let details = lookup(&args)?;

    details.update_all(&mut data)?;
    fs::write(&args.input, &data)?;
    println!(
        "rewrote {} hash region(s) in {}",
        details.regions.len(),
        args.input.display()
    );
    Ok(())
}

fn time_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.subsec_nanos() ^ now.as_secs() as u32
}
