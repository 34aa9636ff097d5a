//! Encoding detection and transcoding module
//!
//! Seed text and extractor output may come in any encoding; everything is
//! decoded to UTF-8 before tokenizing. Dictionary files are read line by line
//! through the same memory-mapped iterator.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs::File;
use std::path::Path;

/// Bytes sampled for detection (first 64KB should be enough)
const SAMPLE_SIZE: usize = 64 * 1024;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a byte buffer by sampling its start
pub fn detect_encoding_bytes(content: &[u8]) -> EncodingInfo {
    let sample = &content[..content.len().min(SAMPLE_SIZE)];

    if sample.is_empty() {
        return EncodingInfo::default();
    }

    if let Some(encoding) = detect_bom(sample) {
        return EncodingInfo {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() == content.len());
    let encoding = detector.guess(None, true);

    // Rough confidence based on whether the content is valid UTF-8
    let confidence = if encoding == encoding_rs::UTF_8 {
        if std::str::from_utf8(sample).is_ok() {
            1.0
        } else {
            0.5
        }
    } else {
        0.8
    };

    EncodingInfo {
        name: encoding.name(),
        confidence,
        encoding,
    }
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    if content.len() >= 3 && content[0..3] == [0xEF, 0xBB, 0xBF] {
        return Some(encoding_rs::UTF_8);
    }
    if content.len() >= 2 {
        if content[0..2] == [0xFE, 0xFF] {
            return Some(encoding_rs::UTF_16BE);
        }
        if content[0..2] == [0xFF, 0xFE] {
            return Some(encoding_rs::UTF_16LE);
        }
    }
    None
}

/// Decode arbitrary bytes to a UTF-8 string, detecting the encoding first
pub fn decode_bytes(content: &[u8]) -> String {
    let info = detect_encoding_bytes(content);
    log::debug!("Decoding content as {} (confidence {:.1})", info.name, info.confidence);
    // decode() strips a matching BOM on its own
    let (decoded, _, had_errors) = info.encoding.decode(content);
    if had_errors {
        log::warn!("Encoding errors while decoding {} content, using lossy conversion", info.name);
    }
    decoded.into_owned()
}

/// Read a whole text file as UTF-8
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(String::new());
    }
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    Ok(decode_bytes(&mmap))
}

/// Memory-mapped line reader
pub struct MmapLineIterator {
    mmap: Option<memmap2::Mmap>,
    encoding: &'static Encoding,
    position: usize,
    line: usize,
}

impl MmapLineIterator {
    /// Create a new memory-mapped line iterator
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;

        // Mapping a zero-length file fails on some platforms
        if file.metadata()?.len() == 0 {
            return Ok(Self {
                mmap: None,
                encoding: encoding_rs::UTF_8,
                position: 0,
                line: 0,
            });
        }

        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        let encoding = detect_encoding_bytes(&mmap).encoding;

        // Skip BOM if present
        let position = if mmap.len() >= 3 && mmap[0..3] == [0xEF, 0xBB, 0xBF] {
            3
        } else if mmap.len() >= 2 && (mmap[0..2] == [0xFE, 0xFF] || mmap[0..2] == [0xFF, 0xFE]) {
            2
        } else {
            0
        };

        Ok(Self {
            mmap: Some(mmap),
            encoding,
            position,
            line: 0,
        })
    }

    /// Number of the line most recently returned (1-based)
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Get the detected encoding
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl Iterator for MmapLineIterator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let mmap = self.mmap.as_ref()?;
        if self.position >= mmap.len() {
            return None;
        }

        let remaining = &mmap[self.position..];
        let line_end = memchr::memchr(b'\n', remaining)
            .map(|i| i + 1)
            .unwrap_or(remaining.len());

        let line_bytes = &remaining[..line_end];
        self.position += line_end;
        self.line += 1;

        let line_bytes = line_bytes.strip_suffix(b"\n").unwrap_or(line_bytes);
        let line_bytes = line_bytes.strip_suffix(b"\r").unwrap_or(line_bytes);

        if self.encoding == encoding_rs::UTF_8 {
            Some(String::from_utf8_lossy(line_bytes).into_owned())
        } else {
            let (decoded, _) = self.encoding.decode_without_bom_handling(line_bytes);
            Some(decoded.into_owned())
        }
    }
}
