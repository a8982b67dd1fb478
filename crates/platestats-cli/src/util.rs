use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use platestats_engine::Window;
use platestats_model::WellContainer;
use tracing::debug;

use crate::schema::plate_collection::PlateCollection;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        debug!(output = %output.display_path(), "wrote JSON");
        Ok(())
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a plate collection from a JSON file
///
/// Plates are validated while parsing: a well outside its plate's layout or
/// a duplicated well is a parse error.
pub fn read_plates_file<P>(path: P) -> anyhow::Result<PlateCollection>
where
    P: AsRef<Path>,
{
    let collection: PlateCollection = read_json_file("plates", path)?;
    debug!(
        plates = collection.plates.len(),
        wells = collection
            .plates
            .iter()
            .map(WellContainer::well_count)
            .sum::<usize>(),
        "loaded plate collection"
    );
    Ok(collection)
}

/// Window selection shared by the commands that read plates.
#[derive(Default, Debug, Clone, clap::Args)]
pub struct WindowArg {
    /// First reading of the window (zero-based, defaults to 0)
    #[arg(long, allow_negative_numbers = true, requires = "length")]
    begin: Option<i64>,
    /// Number of readings in the window; omit to use whole wells
    #[arg(long, allow_negative_numbers = true)]
    length: Option<i64>,
}

impl WindowArg {
    pub fn window(&self) -> anyhow::Result<Option<Window>> {
        let Some(length) = self.length else {
            return Ok(None);
        };
        let begin = self.begin.unwrap_or(0);
        let window = Window::try_from((begin, length))
            .with_context(|| format!("Invalid window --begin {begin} --length {length}"))?;
        Ok(Some(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_arg(begin: Option<i64>, length: Option<i64>) -> WindowArg {
        WindowArg { begin, length }
    }

    #[test]
    fn test_window_arg() {
        assert!(window_arg(None, None).window().unwrap().is_none());
        assert_eq!(
            window_arg(None, Some(3)).window().unwrap(),
            Some(Window::new(0, 3).unwrap())
        );
        assert_eq!(
            window_arg(Some(2), Some(1)).window().unwrap(),
            Some(Window::new(2, 1).unwrap())
        );
        assert!(window_arg(Some(-1), Some(3)).window().is_err());
        assert!(window_arg(Some(0), Some(0)).window().is_err());
    }
}
