mod report;
mod sync;
