//! # Pool de Workers
//! src/server/pool.rs
//!
//! Número fijo de threads que drenan una cola FIFO sin límite de conexiones
//! aceptadas. El thread que acepta solo encola; nunca procesa requests.
//!
//! ```text
//! accept loop ──push──▶ [ cola (Mutex<VecDeque> + Condvar) ] ──pop──▶ worker-0..N
//! ```

use std::collections::VecDeque;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

/// Trabajo que ejecuta un worker
type Job = Box<dyn FnOnce() + Send + 'static>;

struct QueueState {
    jobs: VecDeque<Job>,
    closed: bool,
}

/// Cola compartida entre el accept loop y los workers
struct JobQueue {
    state: Mutex<QueueState>,
    condvar: Condvar,
}

impl JobQueue {
    fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                jobs: VecDeque::new(),
                closed: false,
            }),
            condvar: Condvar::new(),
        }
    }

    /// Un job que hizo panic no guarda estado compartido, así que el lock
    /// envenenado se puede seguir usando
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Encola un job; `false` si la cola ya se cerró
    fn push(&self, job: Job) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        state.jobs.push_back(job);

        // Notificar a un worker esperando
        self.condvar.notify_one();
        true
    }

    /// Bloquea hasta que haya un job; `None` cuando la cola se cerró y vació
    fn pop(&self) -> Option<Job> {
        let mut state = self.lock();
        loop {
            if let Some(job) = state.jobs.pop_front() {
                return Some(job);
            }
            if state.closed {
                return None;
            }
            state = self
                .condvar
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    fn close(&self) {
        self.lock().closed = true;
        self.condvar.notify_all();
    }
}

/// Pool de tamaño fijo
pub struct WorkerPool {
    queue: Arc<JobQueue>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Inicia `size` workers
    ///
    /// # Errores
    ///
    /// Retorna error si el sistema no puede crear un thread.
    pub fn new(size: usize) -> io::Result<Self> {
        let queue = Arc::new(JobQueue::new());
        let mut workers = Vec::with_capacity(size);

        for i in 0..size {
            let queue = Arc::clone(&queue);
            let handle = thread::Builder::new()
                .name(format!("worker-{}", i))
                .spawn(move || Self::worker_loop(queue))?;
            workers.push(handle);
        }

        Ok(Self { queue, workers })
    }

    /// Encola un job para el próximo worker libre
    ///
    /// Retorna `false` si el pool ya se está apagando.
    pub fn execute<F>(&self, job: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue.push(Box::new(job))
    }

    /// Número de workers
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Cierra la cola, deja terminar los jobs pendientes y espera a los workers
    pub fn shutdown(mut self) {
        self.join_all();
    }

    fn join_all(&mut self) {
        self.queue.close();
        for handle in self.workers.drain(..) {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            if handle.join().is_err() {
                tracing::error!(worker = %name, "Worker thread panicked");
            }
        }
    }

    /// Loop principal del worker
    fn worker_loop(queue: Arc<JobQueue>) {
        tracing::debug!("Worker started");

        while let Some(job) = queue.pop() {
            // Un panic en un job no debe matar al worker
            if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                tracing::error!("Job panicked; worker keeps running");
            }
        }

        tracing::debug!("Worker stopped");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.join_all();
    }
}
