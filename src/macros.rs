/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

macro_rules! client_debug {
    ( $l:expr, $($arg:tt)+ ) => {
        $l.log(log::Level::Debug, format_args!($($arg)+))
    };
}

macro_rules! client_warn {
    ( $l:expr, $($arg:tt)+ ) => {
        $l.log(log::Level::Warn, format_args!($($arg)+))
    };
}

macro_rules! client_error {
    ( $l:expr, $($arg:tt)+ ) => {
        $l.log(log::Level::Error, format_args!($($arg)+))
    };
}

// Single object lookup. A 404 comes back as None.
macro_rules! obj_from_path {
    ( $c:expr, $path:expr, $params:expr, $rt:ty ) => {{
        $c.api()
            .get_opt::<$rt>($path, $params)
            .await?
            .map(|mut v| {
                v.client = Some($c.clone());
                v
            })
    }};
}

// Listing. Every failure, a 404 included, is an error.
macro_rules! objs_from_path {
    ( $c:expr, $path:expr, $params:expr, $rt:ty ) => {{
        $c.api()
            .get::<Vec<$rt>>($path, $params)
            .await
            .map(|objs| {
                objs.into_iter()
                    .map(|mut v| {
                        v.client = Some($c.clone());
                        v
                    })
                    .collect::<Vec<$rt>>()
            })
    }};
}

pub(crate) use {client_debug, client_error, client_warn, obj_from_path, objs_from_path};
