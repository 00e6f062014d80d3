use noodles::bgzf;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const LINE_BASES: usize = 60;

/// BGZF block header length; BSIZE sits in its last two bytes
const BLOCK_HEADER_LEN: usize = 18;

/// Write `contigs` as a BGZF FASTA at `path` with `.fai` and `.gzi` sidecars.
pub(crate) fn write_bgzf_fasta(path: &Path, contigs: &[(&str, &str)]) -> io::Result<()> {
    let mut data = Vec::new();
    let mut fai = String::new();

    for (name, seq) in contigs {
        data.extend_from_slice(format!(">{}\n", name).as_bytes());
        let offset = data.len();
        for line in seq.as_bytes().chunks(LINE_BASES) {
            data.extend_from_slice(line);
            data.push(b'\n');
        }
        fai.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            name,
            seq.len(),
            offset,
            LINE_BASES,
            LINE_BASES + 1
        ));
    }

    let mut writer = bgzf::Writer::new(File::create(path)?);
    writer.write_all(&data)?;
    writer.finish()?;

    fs::write(with_suffix(path, ".fai"), fai)?;
    fs::write(with_suffix(path, ".gzi"), build_gzi(&fs::read(path)?)?)?;

    Ok(())
}

/// Build a `.gzi` for BGZF bytes: an entry count, then one
/// `(compressed, uncompressed)` offset pair per data block after the first.
fn build_gzi(src: &[u8]) -> io::Result<Vec<u8>> {
    let mut entries = Vec::new();
    let (mut compressed, mut uncompressed) = (0u64, 0u64);
    let mut pos = 0;

    while pos < src.len() {
        let header = src
            .get(pos..pos + BLOCK_HEADER_LEN)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "truncated block header"))?;
        let block_len = u16::from_le_bytes([header[16], header[17]]) as usize + 1;
        let trailer = src
            .get(pos + block_len - 4..pos + block_len)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "truncated block"))?;
        let isize = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]) as u64;

        // The EOF marker holds no data
        if pos > 0 && isize > 0 {
            entries.push((compressed, uncompressed));
        }

        pos += block_len;
        compressed += block_len as u64;
        uncompressed += isize;
    }

    let mut gzi = Vec::with_capacity(8 + entries.len() * 16);
    gzi.extend_from_slice(&(entries.len() as u64).to_le_bytes());
    for (c, u) in entries {
        gzi.extend_from_slice(&c.to_le_bytes());
        gzi.extend_from_slice(&u.to_le_bytes());
    }
    Ok(gzi)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}
