use std::io::{ErrorKind, Read, Write};

use crate::{
    error::{ConvertError, Result},
    model::PickledModel,
};

pub const MAGIC: [u8; 4] = *b"\0Lun";

/// Which entry of the pickled `ars` list feeds each section. Entry 2 is
/// not part of the network.
pub const SECTION_SOURCES: [usize; 5] = [0, 1, 3, 4, 5];

/// Section names and byte sizes as the engine reads them.
pub const ENGINE_LAYOUT: [(&str, usize); 5] = [
    ("pst0", 64 * 6),
    ("pst1", 10 * 6 * 6),
    ("pst3", 10 * 10 * 2),
    ("layer1", 180),
    ("layer2", 10),
];

pub const ENGINE_FILE_SIZE: usize = 4 + 384 + 360 + 200 + 180 + 10 + 1;

/// `trunc(scale * 256)`, rejecting anything that does not land in a byte.
pub fn quantise_scale(scale: f64) -> Result<u8> {
    let quantised = (scale * 256.0).trunc();

    if !(0.0..=255.0).contains(&quantised) {
        return Err(ConvertError::ScaleOutOfRange(scale));
    }

    Ok(quantised as u8)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoonNetwork {
    sections: [Vec<u8>; 5],
    scale: u8,
}

impl MoonNetwork {
    pub fn from_model(model: &PickledModel) -> Result<Self> {
        model.check_arrays()?;

        let scale = quantise_scale(model.scale)?;
        let sections = SECTION_SOURCES.map(|idx| model.ars[idx].to_vec());

        for ((name, size), section) in ENGINE_LAYOUT.iter().zip(sections.iter()) {
            if section.len() != *size {
                log::warn!(
                    "section {name} is {} bytes, engine expects {size}",
                    section.len()
                );
            }
        }

        Ok(Self { sections, scale })
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn sections(&self) -> impl Iterator<Item = (&'static str, &[u8])> {
        ENGINE_LAYOUT
            .iter()
            .zip(self.sections.iter())
            .map(|(&(name, _), bytes)| (name, bytes.as_slice()))
    }

    pub fn is_engine_layout(&self) -> bool {
        self.sections
            .iter()
            .zip(ENGINE_LAYOUT.iter())
            .all(|(section, &(_, size))| section.len() == size)
    }

    pub fn serialised_len(&self) -> usize {
        MAGIC.len() + self.sections.iter().map(Vec::len).sum::<usize>() + 1
    }

    pub fn serialise_into(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writer.write_all(&MAGIC)?;

        for section in &self.sections {
            writer.write_all(section)?;
        }

        writer.write_all(&[self.scale])
    }

    /// Reads a network laid out exactly as the engine expects it, with
    /// nothing following the scale byte.
    pub fn deserialise_from(reader: &mut impl Read) -> Result<Self> {
        let mut magic = [0; 4];
        read_section(reader, &mut magic, "magic")?;

        if magic != MAGIC {
            return Err(ConvertError::BadMagic(magic));
        }

        let mut sections: [Vec<u8>; 5] = Default::default();

        for (section, &(name, size)) in sections.iter_mut().zip(ENGINE_LAYOUT.iter()) {
            section.resize(size, 0);
            read_section(reader, section, name)?;
        }

        let mut scale = [0];
        read_section(reader, &mut scale, "scale")?;

        let mut rest = [0];
        if reader.read(&mut rest)? != 0 {
            return Err(ConvertError::TrailingData);
        }

        Ok(Self {
            sections,
            scale: scale[0],
        })
    }
}

fn read_section(reader: &mut impl Read, buf: &mut [u8], section: &'static str) -> Result<()> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        ErrorKind::UnexpectedEof => ConvertError::Truncated { section },
        _ => ConvertError::Io(err),
    })
}

#[cfg(test)]
mod tests {
    use serde_bytes::ByteBuf;

    use super::*;

    fn model(ars: &[&[u8]], scale: f64) -> PickledModel {
        PickledModel {
            ars: ars.iter().map(|a| ByteBuf::from(a.to_vec())).collect(),
            scale,
        }
    }

    fn engine_model(scale: f64) -> PickledModel {
        let sizes = [384, 360, 13, 200, 180, 10];
        PickledModel {
            ars: sizes
                .iter()
                .enumerate()
                .map(|(i, &n)| ByteBuf::from(vec![i as u8 + 1; n]))
                .collect(),
            scale,
        }
    }

    #[test]
    fn scale_truncates() {
        assert_eq!(quantise_scale(0.0).unwrap(), 0);
        assert_eq!(quantise_scale(0.5).unwrap(), 128);
        assert_eq!(quantise_scale(0.37).unwrap(), 94);
        assert_eq!(quantise_scale(0.999).unwrap(), 255);
        assert_eq!(quantise_scale(-0.001).unwrap(), 0);
    }

    #[test]
    fn scale_out_of_range() {
        for scale in [1.0, 1.5, -0.5, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(quantise_scale(scale), Err(ConvertError::ScaleOutOfRange(_))),
                "{scale} should be rejected"
            );
        }
    }

    #[test]
    fn known_layout() {
        let model = model(&[b"AA", b"BB", b"XX", b"CC", b"DD", b"EE"], 0.5);
        let network = MoonNetwork::from_model(&model).unwrap();

        let mut out = Vec::new();
        network.serialise_into(&mut out).unwrap();

        assert_eq!(
            out,
            [0x00, 0x4C, 0x75, 0x6E, 0x41, 0x41, 0x42, 0x42, 0x43, 0x43, 0x44, 0x44, 0x45, 0x45, 0x80]
        );
        assert_eq!(network.serialised_len(), out.len());
        assert!(!network.is_engine_layout());
    }

    #[test]
    fn skips_third_array_and_ignores_extras() {
        let model = model(&[b"a", b"bb", b"SKIP", b"ccc", b"", b"d", b"extra"], 0.25);
        let network = MoonNetwork::from_model(&model).unwrap();

        let mut out = Vec::new();
        network.serialise_into(&mut out).unwrap();

        assert_eq!(out.len(), 4 + 1 + 2 + 3 + 0 + 1 + 1);
        assert_eq!(&out[4..], b"abbcccd\x40");
    }

    #[test]
    fn short_model_is_an_error() {
        let model = model(&[b"a", b"b", b"c"], 0.5);

        match MoonNetwork::from_model(&model) {
            Err(ConvertError::TooFewArrays { found }) => assert_eq!(found, 3),
            other => panic!("expected TooFewArrays, got {other:?}"),
        }
    }

    #[test]
    fn engine_network_reads_back() {
        let network = MoonNetwork::from_model(&engine_model(0.75)).unwrap();
        assert!(network.is_engine_layout());

        let mut out = Vec::new();
        network.serialise_into(&mut out).unwrap();
        assert_eq!(out.len(), ENGINE_FILE_SIZE);

        let read = MoonNetwork::deserialise_from(&mut out.as_slice()).unwrap();
        assert_eq!(read, network);
        assert_eq!(read.scale(), 192);

        let firsts: Vec<_> = read.sections().map(|(name, bytes)| (name, bytes[0])).collect();
        assert_eq!(
            firsts,
            [("pst0", 1), ("pst1", 2), ("pst3", 4), ("layer1", 5), ("layer2", 6)]
        );
    }

    #[test]
    fn reader_rejects_bad_magic() {
        let mut bytes = vec![0; ENGINE_FILE_SIZE];
        bytes[..4].copy_from_slice(b"\0Mun");

        let err = MoonNetwork::deserialise_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, ConvertError::BadMagic(m) if &m == b"\0Mun"));
    }

    #[test]
    fn reader_rejects_truncated() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend(vec![0; 384 + 100]);

        let err = MoonNetwork::deserialise_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, ConvertError::Truncated { section: "pst1" }));

        let mut bytes = vec![0; ENGINE_FILE_SIZE - 1];
        bytes[..4].copy_from_slice(&MAGIC);

        let err = MoonNetwork::deserialise_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, ConvertError::Truncated { section: "scale" }));
    }

    #[test]
    fn reader_rejects_trailing_data() {
        let mut bytes = vec![0; ENGINE_FILE_SIZE + 1];
        bytes[..4].copy_from_slice(&MAGIC);

        let err = MoonNetwork::deserialise_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, ConvertError::TrailingData));
    }
}
