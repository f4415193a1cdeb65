use crate::memory::Memory;
use byteorder::{BigEndian, ReadBytesExt};
use std::fs::File;
use std::io::{self, BufReader};

/// Loads a big-endian LC-3 image file into `memory`. The first word is the
/// origin address; every word after that is copied to `memory[origin..]` in
/// sequence, byte-swapped to host order. Reading stops at EOF. A file long
/// enough to run past `0xFFFF` is truncated there rather than wrapping back
/// around to the start of memory.
///
/// Malformed contents (an odd trailing byte, an origin with no payload) are
/// not validated: an odd trailing byte is simply dropped by the underlying
/// `read_u16` call hitting EOF, and a file consisting of only an origin
/// loads zero words.
pub fn load_image(path: &str, memory: &mut Memory) -> io::Result<()> {
    let mut reader = BufReader::new(File::open(path)?);

    let origin = reader.read_u16::<BigEndian>()?;
    let mut address: u32 = u32::from(origin);

    loop {
        if address > 0xFFFF {
            break;
        }

        match reader.read_u16::<BigEndian>() {
            Ok(word) => {
                memory.write(address as u16, word);
                address += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Keyboard;
    use std::io::Write;

    struct NoKeyboard;
    impl Keyboard for NoKeyboard {
        fn poll_key(&mut self) -> Option<u8> {
            None
        }
    }

    fn write_image(words: &[u16]) -> tempfile_shim::TempPath {
        let path = tempfile_shim::unique_path();
        let mut file = File::create(&path.0).unwrap();
        for word in words {
            file.write_all(&word.to_be_bytes()).unwrap();
        }
        path
    }

    mod tempfile_shim {
        use std::path::PathBuf;
        use std::sync::atomic::{AtomicU32, Ordering};

        static COUNTER: AtomicU32 = AtomicU32::new(0);

        pub struct TempPath(pub String);

        impl Drop for TempPath {
            fn drop(&mut self) {
                let _ = std::fs::remove_file(&self.0);
            }
        }

        pub fn unique_path() -> TempPath {
            let n = COUNTER.fetch_add(1, Ordering::SeqCst);
            let mut path = PathBuf::from(std::env::temp_dir());
            path.push(format!("lc3-loader-test-{}-{}.obj", std::process::id(), n));
            TempPath(path.to_str().unwrap().to_string())
        }
    }

    #[test]
    fn loads_words_starting_at_origin() {
        let path = write_image(&[0x3000, 0x1111, 0x2222, 0x3333]);
        let mut memory = Memory::new();
        let mut keyboard = NoKeyboard;

        load_image(&path.0, &mut memory).unwrap();

        assert_eq!(memory.read(0x3000, &mut keyboard), 0x1111);
        assert_eq!(memory.read(0x3001, &mut keyboard), 0x2222);
        assert_eq!(memory.read(0x3002, &mut keyboard), 0x3333);
    }

    #[test]
    fn truncates_at_0xffff_instead_of_wrapping() {
        let path = write_image(&[0xFFFE, 0xAAAA, 0xBBBB, 0xCCCC]);
        let mut memory = Memory::new();
        let mut keyboard = NoKeyboard;

        load_image(&path.0, &mut memory).unwrap();

        assert_eq!(memory.read(0xFFFE, &mut keyboard), 0xAAAA);
        assert_eq!(memory.read(0xFFFF, &mut keyboard), 0xBBBB);
        // the third word would land at 0x10000 and is dropped, not wrapped
        // to address 0x0000
        assert_eq!(memory.read(0x0000, &mut keyboard), 0);
    }

    #[test]
    fn missing_file_reports_open_failure() {
        let result = load_image("/nonexistent/path/to/image.obj", &mut Memory::new());
        assert!(result.is_err());
    }

    #[test]
    fn origin_only_file_loads_no_payload() {
        let path = write_image(&[0x3000]);
        let mut memory = Memory::new();
        let mut keyboard = NoKeyboard;

        load_image(&path.0, &mut memory).unwrap();

        assert_eq!(memory.read(0x3000, &mut keyboard), 0);
    }
}
