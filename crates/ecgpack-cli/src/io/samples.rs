// crates/ecgpack-cli/src/io/samples.rs

use anyhow::Context;

/// Read a raw little-endian 16-bit sample record and select one channel.
///
/// Multi-channel records are sample-major interleaved:
///   s0c0 s0c1 ... s0c(k-1) s1c0 s1c1 ...
/// `channels = 1` reads the whole file as a single stream.
pub fn read_record(path: &str, channels: usize, channel: usize) -> anyhow::Result<Vec<u16>> {
    if channels == 0 {
        anyhow::bail!("channels must be >= 1");
    }
    if channel >= channels {
        anyhow::bail!("channel {channel} out of range (record has {channels})");
    }

    let bytes = std::fs::read(path).with_context(|| format!("read record: {path}"))?;
    if bytes.len() % 2 != 0 {
        anyhow::bail!("record {path} has odd byte length {}, not 16-bit samples", bytes.len());
    }

    let total = bytes.len() / 2;
    if total % channels != 0 {
        anyhow::bail!(
            "record {path} holds {total} samples, not divisible by {channels} channels"
        );
    }

    let mut out = Vec::with_capacity(total / channels);
    for frame in bytes.chunks_exact(2 * channels) {
        let off = 2 * channel;
        out.push(u16::from_le_bytes([frame[off], frame[off + 1]]));
    }
    Ok(out)
}

/// Write samples as raw little-endian 16-bit values.
pub fn write_samples(path: &str, samples: &[u16]) -> anyhow::Result<()> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    std::fs::write(path, out).with_context(|| format!("write samples: {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_select_interleaved() {
        let dir = std::env::temp_dir().join(format!("ecgpack_ch_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rec.bin");

        // 3 samples x 2 channels, sample-major
        let raw: Vec<u16> = vec![10, 1000, 20, 1001, 30, 1002];
        let mut bytes = Vec::new();
        for v in &raw {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        std::fs::write(&path, bytes).unwrap();

        let p = path.to_str().unwrap();
        assert_eq!(read_record(p, 2, 0).unwrap(), vec![10, 20, 30]);
        assert_eq!(read_record(p, 2, 1).unwrap(), vec![1000, 1001, 1002]);
        assert_eq!(read_record(p, 1, 0).unwrap(), raw);
        assert!(read_record(p, 2, 2).is_err());
        assert!(read_record(p, 4, 0).is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
