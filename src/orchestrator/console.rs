//! 终端输入输出
//!
//! 对读写端做泛型，测试时可以用内存缓冲代替 stdin / stdout

use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};

/// 终端
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

/// 标准输入输出
pub fn stdio() -> Console<BufReader<Stdin>, Stdout> {
    Console::new(BufReader::new(io::stdin()), io::stdout())
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// 输出一行
    pub async fn say(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// 输出提示并读取一行，输入结束时返回 `None`
    pub async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.writer.write_all(label.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
