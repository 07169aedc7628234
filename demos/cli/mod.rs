use std::env;
use std::process;

pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(1);
}

pub struct ArgParser {
    args: Vec<String>,
    usage: &'static str,
}

impl ArgParser {
    pub fn new(usage: &'static str) -> Self {
        let args: Vec<String> = env::args().skip(1).collect();

        if args.iter().any(|a| a == "--help" || a == "-h") {
            println!("{usage}");
            process::exit(0);
        }

        Self { args, usage }
    }

    pub fn take_value(&mut self, names: &[&str]) -> Option<String> {
        let mut i = 0;
        while i < self.args.len() {
            if names.contains(&self.args[i].as_str()) {
                let value = self.args.get(i + 1).cloned();
                if value.is_none() {
                    usage_and_exit(self.usage);
                }
                self.args.drain(i..=i + 1);
                return value;
            }
            i += 1;
        }
        None
    }

    #[allow(dead_code)] // Not every example takes flags.
    pub fn take_flag(&mut self, names: &[&str]) -> bool {
        let mut i = 0;
        while i < self.args.len() {
            if names.contains(&self.args[i].as_str()) {
                self.args.remove(i);
                return true;
            }
            i += 1;
        }
        false
    }

    pub fn remaining(self) -> Vec<String> {
        self.args
    }
}

#[allow(dead_code)] // Some examples only need ArgParser/usage helpers.
pub struct Credentials {
    pub host: String,
    pub username: String,
    pub password: String,
    pub proxy: Option<String>,
    pub positionals: Vec<String>,
}

#[allow(dead_code)]
pub fn parse_credentials(usage: &'static str) -> Credentials {
    let mut parser = ArgParser::new(usage);
    let mut credentials = credentials_from_parser(&mut parser, usage);
    credentials.positionals = parser.remaining();
    credentials
}

#[allow(dead_code)]
pub fn credentials_from_parser(parser: &mut ArgParser, usage: &'static str) -> Credentials {
    let host = parser
        .take_value(&["--host", "-H"])
        .or_else(|| env::var(kastlib::session::BACKEND_HOST_ENV).ok())
        .unwrap_or_else(|| usage_and_exit(usage));
    let username = parser
        .take_value(&["--user", "-u"])
        .unwrap_or_else(|| usage_and_exit(usage));
    let password = parser
        .take_value(&["--password", "-p"])
        .unwrap_or_else(|| usage_and_exit(usage));
    let proxy = parser.take_value(&["--proxy"]);

    Credentials {
        host,
        username,
        password,
        proxy,
        positionals: Vec::new(),
    }
}

impl Credentials {
    #[allow(dead_code)]
    pub fn config(&self) -> kastlib::Config {
        let config = kastlib::Config::new(&self.host);
        match &self.proxy {
            Some(proxy) => config.with_proxy(proxy),
            None => config,
        }
    }

    #[allow(dead_code)]
    pub async fn login(&self) -> kastlib::Result<kastlib::Session> {
        kastlib::Session::login(&self.config(), &self.username, &self.password).await
    }
}
