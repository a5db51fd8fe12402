use std::fs::File;
use std::io::BufRead;
use std::path::Path;
use crate::error::SimError;

/// Opens a trace file for line by line reading
pub fn open_trace(path: &Path) -> Result<impl BufRead, SimError> {
    let file_access_error = |source| SimError::FileAccess {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(file_access_error)?;
    get_reader(file).map_err(file_access_error)
}

pub fn get_reader(file: File) -> std::io::Result<impl BufRead> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        const BUFFER_SIZE: usize = 16 * 4096;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    // Memory map the file on unix systems, traces are read strictly front to back
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        // Safety: the map is read only and trace files aren't expected to change under a run
        let mmap = unsafe { Mmap::map(&file)? };
        mmap.advise(Advice::Sequential)?;
        Ok(Cursor::new(mmap))
    }
}
