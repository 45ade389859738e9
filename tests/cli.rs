mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use mockito::Server;
    use predicates::str::contains;

    use std::io::Write;
    use std::process::Command;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "urlalive";

    fn command() -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg("--no-config").env_remove("FORCE_COLOR");
        Ok(cmd)
    }

    #[test]
    fn test_output__when_no_urls_provided() -> TestResult {
        let mut cmd = command()?;

        cmd.assert()
            .code(2)
            .stderr(contains("No URLs provided"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_head_succeeds() -> TestResult {
        let mut server = Server::new_async().await;
        let _head = server
            .mock("HEAD", "/ok")
            .with_status(200)
            .create_async()
            .await;
        let mut cmd = command()?;

        cmd.arg(server.url() + "/ok");

        cmd.assert()
            .success()
            .stdout(contains("alive"))
            .stdout(contains("1 checked: 1 alive, 0 dead, 0 invalid, 0 error"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_head_rejected_and_get_succeeds() -> TestResult {
        let mut server = Server::new_async().await;
        let _head = server
            .mock("HEAD", "/page")
            .with_status(405)
            .create_async()
            .await;
        let _get = server
            .mock("GET", "/page")
            .with_status(200)
            .create_async()
            .await;
        let mut cmd = command()?;

        cmd.arg(server.url() + "/page");

        cmd.assert().success().stdout(contains("200"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_single_dead_link() -> TestResult {
        let mut server = Server::new_async().await;
        let _head = server
            .mock("HEAD", "/missing")
            .with_status(404)
            .create_async()
            .await;
        let _get = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;
        let mut cmd = command()?;

        cmd.arg(server.url() + "/missing");

        cmd.assert()
            .code(1)
            .stdout(contains("dead"))
            .stdout(contains("404"));
        Ok(())
    }

    #[test]
    fn test_output__when_protocol_not_allowed() -> TestResult {
        let mut cmd = command()?;

        cmd.arg("ftp://example.com/file");

        cmd.assert()
            .code(1)
            .stdout(contains("invalid"))
            .stdout(contains("1 checked: 0 alive, 0 dead, 1 invalid, 0 error"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_json_format() -> TestResult {
        let mut server = Server::new_async().await;
        let _head = server
            .mock("HEAD", "/ok")
            .with_status(204)
            .create_async()
            .await;
        let url = server.url() + "/ok";
        let mut cmd = command()?;

        cmd.args(["--format", "json", &url]);

        let output = cmd.output()?;
        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(value["summary"]["alive"], 1);
        assert_eq!(value["results"][url.as_str()]["status"], "alive");
        assert_eq!(value["results"][url.as_str()]["statusCode"], 204);
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_relative_url_with_base() -> TestResult {
        let mut server = Server::new_async().await;
        let head = server
            .mock("HEAD", "/docs")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let mut cmd = command()?;

        cmd.args(["--base-url", &server.url(), "/docs"]);

        cmd.assert().success();
        head.assert_async().await;
        Ok(())
    }

    #[test]
    fn test_output__when_relative_url_without_base() -> TestResult {
        let mut cmd = command()?;

        cmd.arg("/docs");

        cmd.assert().code(1).stdout(contains("invalid"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_custom_header_provided() -> TestResult {
        let mut server = Server::new_async().await;
        let head = server
            .mock("HEAD", "/private")
            .match_header("x-token", "secret")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        let mut cmd = command()?;

        cmd.args(["--header", "x-token: secret", &(server.url() + "/private")]);

        cmd.assert().success();
        head.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_input_file_provided() -> TestResult {
        let mut server = Server::new_async().await;
        let _head = server
            .mock("HEAD", mockito::Matcher::Any)
            .with_status(200)
            .create_async()
            .await;
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "{}/a", server.url())?;
        writeln!(file, "{}/b", server.url())?;
        writeln!(file, "{}/a", server.url())?;
        let mut cmd = command()?;

        cmd.arg("--input").arg(file.path());

        cmd.assert()
            .success()
            .stdout(contains("2 checked: 2 alive"));
        Ok(())
    }

    #[test]
    fn test_output__when_input_json_not_strings() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(br#"["https://example.com", 42]"#)?;
        let mut cmd = command()?;

        cmd.arg("--input").arg(file.path());

        cmd.assert().code(2).stderr(contains("not a string"));
        Ok(())
    }

    #[test]
    fn test_output__when_input_file_missing() -> TestResult {
        let mut cmd = command()?;

        cmd.args(["--input", "/path/that/does/not/exist.txt"]);

        cmd.assert()
            .code(2)
            .stderr(contains("Could not read input file"));
        Ok(())
    }

    #[test]
    fn test_output__when_zero_concurrency() -> TestResult {
        let mut cmd = command()?;

        cmd.args(["--concurrency", "0", "https://example.com"]);

        cmd.assert().code(2).stderr(contains("Concurrency cannot be 0"));
        Ok(())
    }

    #[test]
    fn test_output__when_malformed_header() -> TestResult {
        let mut cmd = command()?;

        cmd.args(["--header", "missing-colon", "https://example.com"]);

        cmd.assert().code(2).stderr(contains("NAME:VALUE"));
        Ok(())
    }

    #[test]
    fn test_output__when_config_file_invalid() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"concurrency = [")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.arg("--config")
            .arg(file.path())
            .arg("https://example.com");

        cmd.assert().code(2).stderr(contains("Invalid TOML"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output__when_config_file_sets_protocols() -> TestResult {
        let mut server = Server::new_async().await;
        let head = server
            .mock("HEAD", "/ok")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"protocols = [\"https\"]\n")?;
        let mut cmd = Command::cargo_bin(NAME)?;

        // The mock server speaks plain http
        cmd.arg("--config")
            .arg(file.path())
            .arg(server.url() + "/ok");

        cmd.assert().code(1).stdout(contains("invalid"));
        head.assert_async().await;
        Ok(())
    }

    #[test]
    fn test_output__when_unknown_format() -> TestResult {
        let mut cmd = command()?;

        cmd.args(["--format", "xml", "https://example.com"]);

        cmd.assert().failure().stderr(contains("invalid value 'xml'"));
        Ok(())
    }
}
