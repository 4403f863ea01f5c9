use clap::Parser;

use datafetch::VecLog;
use datafetch::args::CliArguments;
use datafetch::entry::run;
use datafetch::error::Result;
use datafetch::fetch::FetchResponse;
use datafetch::manifest::FetchManifest;
use datafetch::pipeline::PipelineMap;
use datafetch::world::MockWorld;
use mockall::predicate::eq;

pub struct PipelineTest {
    pub world: MockWorld,
    pub log: VecLog,
}

impl PipelineTest {
    pub fn new(
        register_pipelines: impl FnOnce(&mut PipelineMap<MockWorld>),
        args: &'static [&'static str],
        manifest: &'static str,
    ) -> Self {
        let log = VecLog::new();
        let mut world = MockWorld::new();
        world.expect_pipelines().return_const({
            let mut pipelines = PipelineMap::new();
            register_pipelines(&mut pipelines);
            pipelines
        });
        world
            .expect_arguments()
            .return_const(CliArguments::parse_from(args));
        world.expect_log().return_const(log.clone());
        world
            .expect_read_manifest()
            .returning(move || FetchManifest::parse(manifest));

        Self { world, log }
    }

    /// Lets the mock world answer one URL with a canned status and body.
    pub fn expect_fetch(&mut self, url: &'static str, status: u16, body: &'static [u8]) {
        self.world
            .expect_fetch()
            .with(eq(url))
            .returning(move |_| Ok(FetchResponse::new(status, body.to_vec())));
    }

    pub async fn run(self) -> RunResult {
        let result = run(self.world).await;
        let log = self.log;
        RunResult { result, log }
    }
}

#[derive(Debug)]
#[must_use]
pub struct RunResult {
    result: Result<()>,
    log: VecLog,
}

#[derive(Debug)]
#[must_use]
pub struct RunResultLog(VecLog);

impl RunResult {
    pub fn expect_ok(self, msg: &str) -> RunResultLog {
        self.result.as_ref().expect(msg);
        RunResultLog(self.log)
    }

    pub fn expect_err(self, msg: &str) -> RunResultLog {
        self.result.as_ref().expect_err(msg);
        RunResultLog(self.log)
    }
}

impl RunResultLog {
    fn log_eq(output: &str, expected: &str) -> bool {
        let mut output = output.chars();
        let mut expected = expected.chars();

        let mut ch_out = output.next();
        let mut ch_exp = expected.next();
        loop {
            // `expected` is written in the test source with `/` as the path separator and `\n`
            // line endings. `output` is produced at runtime; paths in it may contain `\\`
            // instead of `/` depending on the platform.
            match (ch_out, ch_exp) {
                // both strings have been consumed
                (None, None) => return true,
                // one string has been consumed, the other is still going
                (None, Some(_)) | (Some(_), None) => return false,
                // both strings continue with the same character
                (Some(a), Some(b)) if a == b => {}
                // the difference is a path separator
                // (or a false positive, but we accept this possibility)
                (Some('\\'), Some('/')) => {}
                // it's a real difference
                (Some(_), Some(_)) => {
                    return false;
                }
            }

            ch_out = output.next();
            ch_exp = expected.next();
        }
    }

    pub fn expect_log(self, expected: &str) {
        let output = self.0.get_lossy();
        assert!(
            Self::log_eq(&output, expected),
            "{output}\nnot equal to\n\n{expected}"
        );
    }
}
