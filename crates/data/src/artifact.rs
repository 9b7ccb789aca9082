//! Model artifact loading.
//!
//! The artifact is treated as an opaque container. Loading checks that the
//! file exists and is a recognised model container; the predictor itself is
//! never deserialized into memory.
//!
//! Checks are structural only:
//! - plain pickle streams need a PROTO opcode (protocol 2 to 5) up front and
//!   a STOP opcode at the end; the opcodes in between are not parsed
//! - compressed joblib dumps are recognised by the codec's magic bytes and
//!   are not decompressed
//! - XGBoost JSON models must parse and carry a `learner` section

use btc_dashboard_core::{ArtifactFormat, DashboardError, JoblibCompression, ModelArtifact, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Pickle PROTO opcode, first byte of protocol 2+ streams.
const PICKLE_PROTO: u8 = 0x80;
/// Pickle STOP opcode, last byte of every complete stream.
const PICKLE_STOP: u8 = b'.';

/// Leading bytes of each codec joblib compresses with.
const JOBLIB_MAGIC: [(&[u8], JoblibCompression); 5] = [
    (b"\x1f\x8b", JoblibCompression::Gzip),
    (b"BZh", JoblibCompression::Bz2),
    (b"\xfd7zXZ\x00", JoblibCompression::Xz),
    (b"\x5d\x00\x00", JoblibCompression::Lzma),
    (b"\x04\x22\x4d\x18", JoblibCompression::Lz4),
];

pub struct ArtifactLoader;

impl ArtifactLoader {
    /// Reads and validates the model artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactNotFound` if the file is absent and `ArtifactCorrupt`
    /// if it is empty or not a recognised model container.
    pub fn load(path: &Path) -> Result<ModelArtifact> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DashboardError::ArtifactNotFound {
                path: path.to_path_buf(),
            },
            _ => DashboardError::Io(e),
        })?;

        let format = detect_format(path, &bytes)?;
        debug!(?format, "Detected model artifact container");

        let artifact = ModelArtifact {
            path: path.to_path_buf(),
            format,
            size_bytes: bytes.len() as u64,
        };
        info!("Loaded {}", artifact.status_line());
        Ok(artifact)
    }
}

fn detect_format(path: &Path, bytes: &[u8]) -> Result<ArtifactFormat> {
    if let Some(compression) = joblib_compression(bytes) {
        return Ok(ArtifactFormat::CompressedPickle { compression });
    }

    match bytes {
        [] => Err(DashboardError::corrupt(path, "file is empty")),
        [PICKLE_PROTO, protocol, ..] => {
            if !(2..=5).contains(protocol) {
                return Err(DashboardError::corrupt(
                    path,
                    format!("unsupported pickle protocol {protocol}"),
                ));
            }
            if bytes.last() != Some(&PICKLE_STOP) {
                return Err(DashboardError::corrupt(path, "truncated pickle stream"));
            }
            Ok(ArtifactFormat::Pickle {
                protocol: *protocol,
            })
        }
        _ if bytes.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{') => {
            let value: serde_json::Value = serde_json::from_slice(bytes)
                .map_err(|e| DashboardError::corrupt(path, format!("invalid JSON model: {e}")))?;
            if value.get("learner").is_none() {
                return Err(DashboardError::corrupt(
                    path,
                    "JSON model has no `learner` section",
                ));
            }
            Ok(ArtifactFormat::Json)
        }
        _ => Err(DashboardError::corrupt(path, "unrecognised model container")),
    }
}

fn joblib_compression(bytes: &[u8]) -> Option<JoblibCompression> {
    // zlib streams have no fixed magic; the CMF/FLG pair must be a multiple of 31.
    if let [0x78, flags, ..] = bytes {
        if ((u16::from(0x78_u8) << 8) | u16::from(*flags)) % 31 == 0 {
            return Some(JoblibCompression::Zlib);
        }
    }

    JOBLIB_MAGIC
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, compression)| *compression)
}
