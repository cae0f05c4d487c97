use byteorder::{ReadBytesExt, WriteBytesExt, LE};

pub trait ReadExt {
    fn read_words<const N: usize>(&mut self) -> Result<[u32; N], super::Error>;
}

pub trait WriteExt {
    fn write_words(&mut self, words: &[u32]) -> Result<(), super::Error>;
}

impl<R: std::io::Read> ReadExt for R {
    fn read_words<const N: usize>(&mut self) -> Result<[u32; N], super::Error> {
        let mut words = [0; N];
        for word in &mut words {
            *word = self.read_u32::<LE>()?;
        }
        Ok(words)
    }
}

impl<W: std::io::Write> WriteExt for W {
    fn write_words(&mut self, words: &[u32]) -> Result<(), super::Error> {
        for word in words {
            self.write_u32::<LE>(*word)?;
        }
        Ok(())
    }
}
