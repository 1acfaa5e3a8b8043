use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

const HEADER_SEPARATOR: char = '/';
const COMMENT_START: char = '#';

#[derive(Clone, Debug, PartialEq)]
pub enum Cfg_Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f32),
    String(String),
}

#[derive(Clone, Debug)]
pub struct Cfg_Entry {
    pub key: String,
    pub value: Cfg_Value,
}

#[derive(Debug)]
pub struct Cfg_Section {
    pub header: String,
    pub entries: Vec<Cfg_Entry>,
}

pub fn parse_config_dir(dir_path: &Path) -> std::io::Result<Vec<Cfg_Section>> {
    if dir_path.is_dir() {
        let mut sections = vec![];
        let mut n_parsed = 0;
        for entry in fs::read_dir(dir_path)? {
            match entry {
                Ok(ref e) if e.path().extension() == Some(OsStr::new("cfg")) => {
                    n_parsed += 1;
                    sections.append(&mut parse_config_file(&e.path())?)
                }
                Err(msg) => lwarn!("{}", msg),
                _ => (),
            }
        }
        lverbose!("Parsed {} cfg files from {:?}.", n_parsed, dir_path);
        Ok(sections)
    } else {
        parse_config_file(dir_path)
    }
}

pub fn parse_config_file(path: &Path) -> std::io::Result<Vec<Cfg_Section>> {
    let file = File::open(path)?;
    Ok(parse_lines(readable_lines(BufReader::new(file), path), path))
}

// Unreadable lines become empty, so the line numbers reported later still match the file.
fn readable_lines<'a>(
    reader: impl BufRead + 'a,
    path: &'a Path,
) -> impl Iterator<Item = String> + 'a {
    reader
        .lines()
        .enumerate()
        .map(move |(lineno, line)| match line {
            Ok(line) => line,
            Err(err) => {
                lwarn!(
                    "Line {} in file {:?} could not be read and will be ignored: {}",
                    lineno + 1,
                    path,
                    err
                );
                String::new()
            }
        })
}

pub fn parse_lines(lines: impl Iterator<Item = String>, path: &Path) -> Vec<Cfg_Section> {
    let mut sections = vec![];
    let mut cur_section = Cfg_Section {
        header: String::from(""),
        entries: vec![],
    };

    let lines = lines.map(|mut line| {
        if let Some(comment_start) = line.find(COMMENT_START) {
            line.truncate(comment_start);
        }
        line
    });

    for (lineno, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix(HEADER_SEPARATOR) {
            if !cur_section.header.is_empty() {
                sections.push(cur_section);
                cur_section = Cfg_Section {
                    header: String::from(""),
                    entries: vec![],
                };
            }
            cur_section.header = String::from(header.trim());
        } else if cur_section.header.is_empty() {
            lwarn!(
                "Line {} in file {:?} is outside any section and will be ignored: `{}`",
                lineno + 1,
                path,
                line
            );
        } else {
            let mut tokens = line.splitn(2, char::is_whitespace);
            // splitn always yields at least one token on a non-empty line.
            let key = tokens.next().unwrap_or("");
            let val = tokens.next().unwrap_or("");
            cur_section.entries.push(Cfg_Entry {
                key: String::from(key),
                value: parse_value(val.trim()),
            });
        }
    }
    if !cur_section.header.is_empty() {
        sections.push(cur_section);
    }

    sections
}

fn parse_value(raw: &str) -> Cfg_Value {
    if raw.is_empty() {
        Cfg_Value::Nil
    }
    // @Speed: this is easy but inefficient! An actual lexer would be faster, but for now this is ok.
    else if let Ok(v) = raw.parse::<i64>() {
        Cfg_Value::Int(v)
    } else if let Ok(v) = raw.parse::<f32>() {
        Cfg_Value::Float(v)
    } else if let Ok(v) = raw.parse::<bool>() {
        Cfg_Value::Bool(v)
    } else {
        Cfg_Value::String(String::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let lines: Vec<String> = vec![
            "# This is a sample file.",
            " /libgodot  ",
            "  ",
            "path ./libgodot.so",
            "  lazy   false",
            "  entry_nil",
            "project_path ../../project/  ",
            "multi_string foo bar   baz #this is a comment#",
            "max_iterations -2",
            "",
            "   ###",
            "scale -1.5 # comment",
            "/other_header",
            "",
        ]
        .iter()
        .map(|&s| String::from(s))
        .collect();
        let parsed = parse_lines(lines.into_iter(), &std::path::PathBuf::new());

        assert_eq!(parsed.len(), 2);

        let sec1 = &parsed[0];
        assert_eq!(sec1.header, "libgodot");
        assert_eq!(sec1.entries.len(), 7);

        assert_eq!(sec1.entries[0].key, "path");
        assert_eq!(
            sec1.entries[0].value,
            Cfg_Value::String(String::from("./libgodot.so"))
        );
        assert_eq!(sec1.entries[1].key, "lazy");
        assert_eq!(sec1.entries[1].value, Cfg_Value::Bool(false));
        assert_eq!(sec1.entries[2].key, "entry_nil");
        assert_eq!(sec1.entries[2].value, Cfg_Value::Nil);
        assert_eq!(sec1.entries[3].key, "project_path");
        assert_eq!(
            sec1.entries[3].value,
            Cfg_Value::String(String::from("../../project/"))
        );
        assert_eq!(sec1.entries[4].key, "multi_string");
        assert_eq!(
            sec1.entries[4].value,
            Cfg_Value::String(String::from("foo bar   baz"))
        );
        assert_eq!(sec1.entries[5].key, "max_iterations");
        assert_eq!(sec1.entries[5].value, Cfg_Value::Int(-2));
        assert_eq!(sec1.entries[6].key, "scale");
        assert_eq!(sec1.entries[6].value, Cfg_Value::Float(-1.5));

        let sec2 = &parsed[1];
        assert_eq!(sec2.header, "other_header");
        assert_eq!(sec2.entries.len(), 0);
    }

    #[test]
    fn undecodable_lines_are_skipped() {
        let bytes: &[u8] = b"/run\nvariant desktop\nbad \xff\xfe\nmax_iterations 3\n";
        let path = std::path::PathBuf::from("runner.cfg");
        let lines = readable_lines(std::io::Cursor::new(bytes), &path).collect::<Vec<_>>();
        assert_eq!(lines, ["/run", "variant desktop", "", "max_iterations 3"]);

        let parsed = parse_lines(lines.into_iter(), &path);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].entries.len(), 2);
        assert_eq!(parsed[0].entries[1].value, Cfg_Value::Int(3));
    }

    #[test]
    fn method_hashes_parse_as_ints() {
        assert_eq!(parse_value("2240911060"), Cfg_Value::Int(2_240_911_060));
        assert_eq!(parse_value("3218959716"), Cfg_Value::Int(3_218_959_716));
    }

    #[test]
    fn entries_before_first_header_are_dropped() {
        let lines = vec!["orphan 3", "/run", "variant desktop"]
            .into_iter()
            .map(String::from);
        let parsed = parse_lines(lines, &std::path::PathBuf::new());

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].entries.len(), 1);
        assert_eq!(parsed[0].entries[0].key, "variant");
    }
}
