//! Bulk insert, lookup, and removal timings over a word list.

use crate::radix::RadixTrie;
use log::{debug, info};
use std::error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::result;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    MissingKey(String),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IOError(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IOError(error) => Some(error),
            Error::MissingKey(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IOError(error) => write!(f, "{}", error),
            Error::MissingKey(key) => write!(f, "inserted key {:?} not found", key),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// A list of words paired with their zero-based line number.
///
/// Every line becomes an entry, including empty lines and repeated words.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dictionary {
    words: Vec<(String, usize)>,
}

impl Dictionary {
    /// Reads a newline-delimited word list from `reader`. Both `\n` and `\r\n` line endings are
    /// accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_trie::perf::Dictionary;
    ///
    /// let dictionary = Dictionary::from_reader("apple\napply\n".as_bytes()).unwrap();
    /// assert_eq!(dictionary.len(), 2);
    /// assert_eq!(dictionary.words()[1], (String::from("apply"), 1));
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let word = line?;
            let index = words.len();
            words.push((word, index));
        }
        Ok(Dictionary { words })
    }

    /// Reads a newline-delimited word list from the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let dictionary = Self::from_reader(BufReader::new(file))?;
        debug!("loaded {} words from {}", dictionary.len(), path.as_ref().display());
        Ok(dictionary)
    }

    pub fn words(&self) -> &[(String, usize)] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Durations of each pass of [`run`].
#[derive(Clone, Copy, Debug)]
pub struct Report {
    pub words: usize,
    pub distinct: usize,
    pub insert: Duration,
    pub contains: Duration,
    pub remove: Duration,
}

fn timed<T, F>(name: &str, f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let ret = f();
    let elapsed = start.elapsed();
    info!("{}: {}ms", name, elapsed.as_millis());
    (ret, elapsed)
}

/// Inserts every word of `dictionary` into one trie, checks that each one is found, then removes
/// them all.
///
/// # Examples
///
/// ```
/// use radix_trie::perf::{self, Dictionary};
///
/// let dictionary = Dictionary::from_reader("bar\nbat\nbaz\nbar\n".as_bytes()).unwrap();
/// let report = perf::run(&dictionary).unwrap();
/// assert_eq!(report.words, 4);
/// assert_eq!(report.distinct, 3);
/// ```
pub fn run(dictionary: &Dictionary) -> Result<Report> {
    info!("dictionary contains {} words", dictionary.len());
    let mut trie = RadixTrie::new();

    let (_, insert) = timed("insert", || {
        for (word, value) in dictionary.words() {
            trie.insert(word, *value);
        }
    });
    let distinct = trie.len();
    debug!("{} distinct words in {} nodes", distinct, trie.node_count());

    let (missing, contains) = timed("contains", || {
        dictionary
            .words()
            .iter()
            .find(|(word, _)| !trie.contains(word))
            .map(|(word, _)| word.clone())
    });
    if let Some(word) = missing {
        return Err(Error::MissingKey(word));
    }

    let (_, remove) = timed("remove", || {
        for (word, _) in dictionary.words() {
            trie.remove(word);
        }
    });
    debug_assert!(trie.is_empty());

    Ok(Report {
        words: dictionary.len(),
        distinct,
        insert,
        contains,
        remove,
    })
}

#[cfg(test)]
mod tests {
    use super::{run, Dictionary, Error};
    use std::error::Error as StdError;
    use std::io::{self, BufRead, Read};

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    impl BufRead for FailingReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }

        fn consume(&mut self, _: usize) {}
    }

    #[test]
    fn test_from_reader() {
        let dictionary = Dictionary::from_reader("a\r\n\nab\na\n".as_bytes()).unwrap();
        assert_eq!(
            dictionary.words(),
            &[
                (String::from("a"), 0),
                (String::from(""), 1),
                (String::from("ab"), 2),
                (String::from("a"), 3),
            ],
        );
    }

    #[test]
    fn test_from_reader_error() {
        match Dictionary::from_reader(FailingReader) {
            Err(error @ Error::IOError(_)) => {
                assert!(error.source().is_some());
                assert_eq!(error.to_string(), "disk on fire");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        match Dictionary::load("/nonexistent/words.txt") {
            Err(Error::IOError(error)) => assert_eq!(error.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_run() {
        let dictionary = Dictionary::from_reader("\nromane\nromanus\nromulus\nromane\n".as_bytes()).unwrap();
        let report = run(&dictionary).unwrap();
        assert_eq!(report.words, 5);
        assert_eq!(report.distinct, 4);
    }

    #[test]
    fn test_run_empty() {
        let report = run(&Dictionary::default()).unwrap();
        assert_eq!(report.words, 0);
        assert_eq!(report.distinct, 0);
    }

    #[test]
    fn test_missing_key_display() {
        let error = Error::MissingKey(String::from("foo"));
        assert_eq!(error.to_string(), "inserted key \"foo\" not found");
        assert!(error.source().is_none());
    }
}
