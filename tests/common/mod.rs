use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub const DICT: &str = "\
江南 3000 ns
皮革厂 200 n
皮革 800 n
倒闭 1500 v
了 50000 ul
老板 2000 n
黄鹤 50 nr
带着 900 v
小姨子 80 n
跑 1200 v
";

pub const IDF: &str = "\
江南 9.5
皮革厂 11.75
倒闭 8.0
老板 6.5
黄鹤 12.25
带着 5.0
小姨子 10.5
跑 4.25
";

pub const STOP_WORDS: &str = "\
了
，
。
!
";

pub struct Fixture {
    _dir: TempDir,
    pub dict: PathBuf,
    pub idf: PathBuf,
    pub stop_words: PathBuf,
}

pub fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let dict = dir.path().join("jieba.dict.txt");
    let idf = dir.path().join("idf.txt");
    let stop_words = dir.path().join("stop_words.txt");
    fs::write(&dict, DICT).unwrap();
    fs::write(&idf, IDF).unwrap();
    fs::write(&stop_words, STOP_WORDS).unwrap();
    Fixture {
        _dir: dir,
        dict,
        idf,
        stop_words,
    }
}
