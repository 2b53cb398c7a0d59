//! Binary encoding of a single group.
//!
//! Layout: name, flag count (i32), schematic count (i32), flag lines, then
//! one record per schematic in the schematic's own format.

use std::io::{Read, Write};

use crate::error::Result;
use crate::schematic::Schematic;
use crate::stream::{read_count, read_utf, write_count, write_utf};

use super::ObjectGroup;

impl<S: Schematic> ObjectGroup<S> {
    /// Decode a group from `reader`, replacing this group's name, flags and
    /// schematics.
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        self.flags.clear();
        self.schematics.clear();
        self.reset_derived();

        self.name = read_utf(reader)?;
        let flag_count = read_count(reader)?;
        let schematic_count = read_count(reader)?;

        for _ in 0..flag_count {
            self.flags.push(read_utf(reader)?);
        }

        for _ in 0..schematic_count {
            self.schematics.push(S::read_from(reader)?);
        }

        Ok(())
    }

    /// Decode a new group from `reader`.
    pub fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut group = Self::new(String::new());
        group.read_from(reader)?;
        Ok(group)
    }

    /// Encode the group to `writer`.
    ///
    /// `progress` receives the fraction of schematics written: `0.0` before
    /// the first one and `k / n` after each. A group without schematics
    /// reports `1.0` once.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        mut progress: Option<&mut dyn FnMut(f64)>,
    ) -> Result<()> {
        write_utf(writer, &self.name)?;
        write_count(writer, self.flags.len())?;
        write_count(writer, self.schematics.len())?;

        for flag in &self.flags {
            write_utf(writer, flag)?;
        }

        let total = self.schematics.len();
        if let Some(report) = progress.as_deref_mut() {
            report(if total == 0 { 1.0 } else { 0.0 });
        }

        for (done, schematic) in self.schematics.iter().enumerate() {
            schematic.write_to(writer)?;

            if let Some(report) = progress.as_deref_mut() {
                report((done + 1) as f64 / total as f64);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroupError;
    use crate::schematic::{Block, BlockPos, Structure};
    use crate::stream::write_i32;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn sample_group() -> ObjectGroup<Structure> {
        let mut group = ObjectGroup::new("ruins/arch");
        group.extend_flags(["priority 4", "no snow", "world chance 0.5", "sink 1"]);

        for i in 0..3 {
            let mut s = Structure::new(format!("arch-{}", i), 3, 3, 1);
            s.set_block(BlockPos::new(i, 0, 0), Block::STONE);
            s.set_block(BlockPos::new(1, 2, 0), Block::LEAVES);
            s.recalculate_mount_shift();
            group.push_schematic(s);
        }
        group
    }

    fn encode(group: &ObjectGroup<Structure>) -> Vec<u8> {
        let mut buf = Vec::new();
        group.write_to(&mut buf, None).unwrap();
        buf
    }

    #[test]
    fn test_round_trip() {
        let group = sample_group();
        let decoded = ObjectGroup::<Structure>::decode(&mut Cursor::new(encode(&group))).unwrap();

        assert_eq!(decoded.name(), group.name());
        assert_eq!(decoded.flags(), group.flags());
        assert_eq!(decoded.schematics(), group.schematics());
        assert_eq!(decoded, group);
    }

    #[test]
    fn test_header_layout() {
        let buf = encode(&sample_group());

        // u16 length + "ruins/arch"
        assert_eq!(&buf[..2], &[0, 10]);
        assert_eq!(&buf[2..12], b"ruins/arch");
        assert_eq!(&buf[12..16], &[0, 0, 0, 4]);
        assert_eq!(&buf[16..20], &[0, 0, 0, 3]);
        // first flag
        assert_eq!(&buf[20..22], &[0, 10]);
        assert_eq!(&buf[22..32], b"priority 4");
    }

    #[test]
    fn test_read_replaces_existing_content() {
        let source = sample_group();
        let buf = encode(&source);

        let mut target: ObjectGroup<Structure> = ObjectGroup::new("old");
        target.push_flag("priority 99");
        target.push_schematic(Structure::new("leftover", 1, 1, 1));
        assert_eq!(target.priority().unwrap(), Some(99));

        target.read_from(&mut Cursor::new(buf)).unwrap();

        assert_eq!(target.name(), "ruins/arch");
        assert_eq!(target.flags().len(), 4);
        assert_eq!(target.len(), 3);
        assert!(target.schematics().iter().all(|s| s.name() != "leftover"));
        // derived values come from the new flags
        assert_eq!(target.priority().unwrap(), Some(4));
    }

    #[test]
    fn test_empty_group_round_trip() {
        let group: ObjectGroup<Structure> = ObjectGroup::new("empty");
        let decoded = ObjectGroup::<Structure>::decode(&mut Cursor::new(encode(&group))).unwrap();

        assert_eq!(decoded.name(), "empty");
        assert!(decoded.flags().is_empty());
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_progress_reports_each_schematic() {
        let group = sample_group();
        let mut seen = Vec::new();
        let mut record = |f: f64| seen.push(f);

        group.write_to(&mut Vec::new(), Some(&mut record)).unwrap();

        assert_eq!(seen, vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
    }

    #[test]
    fn test_progress_on_empty_group() {
        let group: ObjectGroup<Structure> = ObjectGroup::new("empty");
        let mut seen = Vec::new();
        let mut record = |f: f64| seen.push(f);

        group.write_to(&mut Vec::new(), Some(&mut record)).unwrap();

        assert_eq!(seen, vec![1.0]);
    }

    #[test]
    fn test_truncated_stream_is_io_error() {
        let mut buf = encode(&sample_group());
        buf.truncate(buf.len() - 5);

        let err = ObjectGroup::<Structure>::decode(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, GroupError::IoError(_)));
    }

    #[test]
    fn test_negative_flag_count() {
        let mut buf = Vec::new();
        crate::stream::write_utf(&mut buf, "g").unwrap();
        write_i32(&mut buf, -1).unwrap();
        write_i32(&mut buf, 0).unwrap();

        let err = ObjectGroup::<Structure>::decode(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, GroupError::IoError(_)));
    }

    #[test]
    fn test_write_failure_propagates() {
        struct Broken;

        impl std::io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = sample_group().write_to(&mut Broken, None).unwrap_err();
        assert!(matches!(err, GroupError::IoError(_)));
    }
}
