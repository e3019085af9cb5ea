use crate::{
    error::{Error, Result},
    sql::{
        parser::{lexer::Lexer, parse_set_clause, parse_values, parse_where_clause},
        plan::Command,
    },
};

/// Command planner - turns a command line into a [`Command`]
///
/// ```text
/// create_table <table> <col:type> ...
/// drop_table <table>
/// list_tables
/// insert into <table> values (<v1>, <v2>, ...)
/// select from <table> [where <col> <op> <value>]
/// update <table> set <col> = <value> [where <col> <op> <value>]
/// delete from <table> where <col> <op> <value>
/// info <table>
/// ```
pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self {}
    }

    pub fn build(&self, line: &str) -> Result<Command> {
        let words = Lexer::words(line).collect::<Result<Vec<_>>>()?;
        let Some(command) = words.first() else {
            return Err(Error::MalformedClause("empty command".into()));
        };

        match command.to_lowercase().as_str() {
            "create_table" => self.build_create_table(&words),
            "drop_table" => Ok(Command::DropTable {
                name: self.single_arg(&words, "drop_table <table>")?,
            }),
            "list_tables" => match words.len() {
                1 => Ok(Command::ListTables),
                _ => Err(usage("list_tables")),
            },
            "insert" => self.build_insert(&words),
            "select" => self.build_select(&words),
            "update" => self.build_update(&words),
            "delete" => self.build_delete(&words),
            "info" => Ok(Command::Info {
                name: self.single_arg(&words, "info <table>")?,
            }),
            other => Err(Error::MalformedClause(format!("unknown command {}", other))),
        }
    }

    fn build_create_table(&self, words: &[String]) -> Result<Command> {
        if words.len() < 3 {
            return Err(usage("create_table <table> <column:type> ..."));
        }
        Ok(Command::CreateTable {
            name: words[1].clone(),
            columns: words[2..].to_vec(),
        })
    }

    fn build_insert(&self, words: &[String]) -> Result<Command> {
        if words.len() < 5 || !is_keyword(&words[1], "into") || !is_keyword(&words[3], "values") {
            return Err(usage("insert into <table> values (<value1>, <value2>, ...)"));
        }
        Ok(Command::Insert {
            table_name: words[2].clone(),
            values: parse_values(&words[4..].join(" "))?,
        })
    }

    fn build_select(&self, words: &[String]) -> Result<Command> {
        const USAGE: &str = "select from <table> [where <column> <op> <value>]";
        if words.len() < 3 || !is_keyword(&words[1], "from") {
            return Err(usage(USAGE));
        }
        let condition = match &words[3..] {
            [] => None,
            [kw, rest @ ..] if is_keyword(kw, "where") && !rest.is_empty() => {
                parse_where_clause(&rest.join(" "))?
            }
            _ => return Err(usage(USAGE)),
        };
        Ok(Command::Select {
            table_name: words[2].clone(),
            condition,
        })
    }

    fn build_update(&self, words: &[String]) -> Result<Command> {
        const USAGE: &str = "update <table> set <column> = <value> [where <column> <op> <value>]";
        if words.len() < 4 || !is_keyword(&words[2], "set") {
            return Err(usage(USAGE));
        }
        let (set, condition) = match words.iter().position(|w| is_keyword(w, "where")) {
            Some(pos) if pos > 3 && pos + 1 < words.len() => (
                &words[3..pos],
                parse_where_clause(&words[pos + 1..].join(" "))?,
            ),
            Some(_) => return Err(usage(USAGE)),
            None => (&words[3..], None),
        };
        Ok(Command::Update {
            table_name: words[1].clone(),
            assignments: parse_set_clause(&set.join(" "))?,
            condition,
        })
    }

    fn build_delete(&self, words: &[String]) -> Result<Command> {
        const USAGE: &str = "delete from <table> where <column> <op> <value>";
        if words.len() < 5 || !is_keyword(&words[1], "from") || !is_keyword(&words[3], "where") {
            return Err(usage(USAGE));
        }
        Ok(Command::Delete {
            table_name: words[2].clone(),
            condition: parse_where_clause(&words[4..].join(" "))?,
        })
    }

    fn single_arg(&self, words: &[String], usage_text: &str) -> Result<String> {
        match words {
            [_, arg] => Ok(arg.clone()),
            _ => Err(usage(usage_text)),
        }
    }
}

fn is_keyword(word: &str, keyword: &str) -> bool {
    word.eq_ignore_ascii_case(keyword)
}

fn usage(text: &str) -> Error {
    Error::MalformedClause(format!("usage: {}", text))
}
