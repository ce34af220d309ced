//! Python bindings for the process-wide fingerprint pipeline.

use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::error::Error;
use crate::pipeline;

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::ResourceLoad { .. } => PyIOError::new_err(err.to_string()),
        Error::Malformed { .. } | Error::EmptyResource(_) => PyValueError::new_err(err.to_string()),
        Error::NotInitialized | Error::AlreadyInitialized => {
            PyRuntimeError::new_err(err.to_string())
        }
    }
}

#[pyfunction]
#[pyo3(name = "load_dictionary")]
fn load_dictionary_py(dict_path: &str, idf_path: &str, stop_words_path: &str) -> PyResult<()> {
    crate::init_logging();
    pipeline::load_dictionary(dict_path, idf_path, stop_words_path).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(name = "simhash", signature = (text, hashbits = -1))]
fn simhash_py(text: &str, hashbits: i32) -> PyResult<u64> {
    pipeline::simhash(text, hashbits).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(name = "simhash_batch", signature = (texts, hashbits = -1))]
fn simhash_batch_py(py: Python<'_>, texts: Vec<String>, hashbits: i32) -> PyResult<Vec<u64>> {
    let hasher = pipeline::global().map_err(to_py_err)?;
    Ok(py.allow_threads(|| hasher.simhash_batch(&texts, hashbits)))
}

#[pymodule]
fn idf_simhash(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(load_dictionary_py, m)?)?;
    m.add_function(wrap_pyfunction!(simhash_py, m)?)?;
    m.add_function(wrap_pyfunction!(simhash_batch_py, m)?)?;
    Ok(())
}
