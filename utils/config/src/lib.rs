use std::{fmt, str::FromStr};

/// Declares a configuration struct whose fields are read from environment
/// variables named after the fields in upper case. A field with `= default`
/// falls back to the default when the variable is not set.
///
/// ```ignore
/// config::env_config! {
///     struct NodeConfig {
///         chain_node: String = "http://127.0.0.1:8545".into(),
///         test_wallets: config::List<String>,
///     }
/// }
///
/// let config = NodeConfig::from_env();
/// ```
#[macro_export]
macro_rules! env_config {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {$(
            $(#[$field_meta:meta])*
            $field:ident: $ty:ty $(= $default:expr)?,
        )*}
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {$(
            $(#[$field_meta])*
            pub $field: $ty,
        )*}

        impl $name {
            /// Reads the config from the process environment, printing the
            /// offending variables and exiting when any of them is missing or
            /// does not parse.
            pub fn from_env() -> Self {
                match Self::from_lookup(|key| std::env::var(key).ok()) {
                    Ok(config) => config,
                    Err(err) => {
                        eprint!("{err}");
                        std::process::exit(1);
                    }
                }
            }

            pub fn from_lookup(
                lookup: impl Fn(&str) -> Option<String>,
            ) -> Result<Self, $crate::ConfigError> {
                let mut errors = $crate::ConfigError::default();

                $(
                    let $field: Option<$ty> = {
                        let key = stringify!($field).to_uppercase();
                        let value = lookup(&key)
                            $(.or_else(|| Some({
                                let default: $ty = $default;
                                default
                            }.to_string())))?;
                        match value {
                            Some(value) => match value.parse::<$ty>() {
                                Ok(value) => Some(value),
                                Err(e) => {
                                    errors.invalid.push((key, e.to_string()));
                                    None
                                }
                            },
                            None => {
                                errors.missing.push(key);
                                None
                            }
                        }
                    };
                )*

                match ($($field,)*) {
                    ($(Some($field),)*) => Ok(Self { $($field,)* }),
                    _ => Err(errors),
                }
            }
        }
    };
}

/// Variables that prevented a config from loading.
#[derive(Debug, Default)]
pub struct ConfigError {
    pub missing: Vec<String>,
    pub invalid: Vec<(String, String)>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.missing.is_empty() {
            writeln!(f, "Missing environment variables:")?;
            for key in &self.missing {
                writeln!(f, "\t{key}")?;
            }
        }

        if !self.invalid.is_empty() {
            writeln!(f, "Invalid environment variables:")?;
            for (key, err) in &self.invalid {
                writeln!(f, "\t{key}: {err}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ConfigError {}

/// Comma separated list, blank entries are skipped so an empty variable is an
/// empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<T>(pub Vec<T>);

impl<T> Default for List<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(value: Vec<T>) -> Self {
        Self(value)
    }
}

impl<T: FromStr> FromStr for List<T> {
    type Err = <T as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(",")?;
            }
            item.fmt(f)?;
        }
        Ok(())
    }
}
