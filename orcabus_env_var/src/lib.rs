// Re-export paste so callers of the macro don't need to depend on it
pub use paste;
use thiserror::Error;


#[cfg(test)]
mod testing_harness {
    use super::VarNameErr;
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static MOCK_VARS: RefCell<Option<HashMap<&'static str, String>>> = const { RefCell::new(None) };
    }

    pub fn read_env(s: &'static str) -> Result<String, VarNameErr> {
        let mocked = MOCK_VARS.with_borrow(|vars| {
            vars.as_ref()
                .map(|vars| vars.get(s).cloned().ok_or(std::env::VarError::NotPresent))
        });
        mocked
            .unwrap_or_else(|| std::env::var(s))
            .map_err(|err| VarNameErr { var_name: s, err })
    }

    /// run `cb` with the environment replaced by `vars`
    pub(crate) fn with_mock_env<Cb, U>(vars: &[(&'static str, &str)], cb: Cb) -> U
    where
        Cb: FnOnce() -> U,
    {
        let map = vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        MOCK_VARS.with_borrow_mut(|cur| *cur = Some(map));
        let output = cb();
        MOCK_VARS.with_borrow_mut(|cur| *cur = None);
        output
    }
}

#[cfg(test)]
pub use testing_harness::read_env;

#[cfg(not(test))]
pub fn read_env(s: &'static str) -> Result<String, VarNameErr> {
    std::env::var(s).map_err(|err| VarNameErr { var_name: s, err })
}

/// The error produced when a declared environment variable cannot be read
#[derive(Debug, Error)]
#[error("could not read environment variable {var_name}: {err}")]
pub struct VarNameErr {
    var_name: &'static str,
    err: std::env::VarError,
}

impl VarNameErr {
    /// the name of the variable that failed to load
    pub fn var_name(&self) -> &'static str {
        self.var_name
    }
}

/// Declares a newtype whose existence proves that the SCREAMING_SNAKE_CASE
/// environment variable of the same name was present when it was built.
///
/// ```ignore
/// env_var! {
///     pub struct WorkflowName;
/// }
/// let name = WorkflowName::new()?; // reads WORKFLOW_NAME
/// ```
#[macro_export]
macro_rules! env_var {
    (
        $(#[$attr:meta])*
        $v:vis struct $n:ident;
    ) => {
        $crate::paste::paste! {
            #[doc = "Proof that the `" $n:snake:upper "` environment variable was read"]
            $(#[$attr])*
            $v struct $n(std::sync::Arc<str>);

            impl $n {
                #[doc = "Read `" $n:snake:upper "` from the environment"]
                #[allow(dead_code)]
                #[tracing::instrument(err)]
                $v fn new() -> Result<Self, $crate::VarNameErr> {
                    let res = $crate::read_env(stringify!([<$n:snake:upper>]))?;
                    Ok(Self(std::sync::Arc::from(res)))
                }

                #[doc = "Construct directly from a value, bypassing the environment"]
                #[allow(dead_code)]
                $v fn from_value(value: impl Into<std::sync::Arc<str>>) -> Self {
                    Self(value.into())
                }

                #[doc = "The name of the environment variable backing this type"]
                #[allow(dead_code)]
                $v const fn var_name() -> &'static str {
                    stringify!([<$n:snake:upper>])
                }

                #[doc = "A shared handle to the value"]
                #[allow(dead_code)]
                $v fn as_arc(&self) -> std::sync::Arc<str> {
                    self.0.clone()
                }
            }

            impl std::ops::Deref for $n {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    &self.0
                }
            }

            impl std::convert::AsRef<str> for $n {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl std::fmt::Debug for $n {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.debug_tuple(stringify!($n)).field(&&*self.0).finish()
                }
            }
        }
    };
}
