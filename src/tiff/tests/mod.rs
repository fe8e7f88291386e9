#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod writer_tests;
